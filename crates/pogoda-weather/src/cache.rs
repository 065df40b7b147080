//! Geocode result cache.
//!
//! The resolver only needs whole-entry get/set, so any shared store works.
//! `MemoryCache` is the in-process implementation.

use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::types::GeoCandidate;

/// Cache key: normalized query text plus requested result count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    query: String,
    limit: usize,
}

impl CacheKey {
    pub fn new(query: &str, limit: usize) -> Self {
        Self {
            query: query.trim().to_lowercase(),
            limit,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "coords:{}:{}", self.query, self.limit)
    }
}

/// Shared store for raw geocode candidates.
pub trait GeoCache: Send + Sync {
    /// Live entry for `key`, or `None` if absent or expired.
    fn get(&self, key: &CacheKey) -> Option<Vec<GeoCandidate>>;

    /// Store `candidates` under `key`, replacing any previous entry.
    fn set(&self, key: CacheKey, candidates: Vec<GeoCandidate>, ttl: Duration);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    candidates: Vec<GeoCandidate>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.stored_at.elapsed() >= self.ttl
    }
}

/// Process-wide in-memory cache with per-entry TTL.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl GeoCache for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<GeoCandidate>> {
        let entries = self.entries.read();
        let entry = entries.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(entry.candidates.clone())
    }

    fn set(&self, key: CacheKey, candidates: Vec<GeoCandidate>, ttl: Duration) {
        let entry = CacheEntry {
            candidates,
            stored_at: Instant::now(),
            ttl,
        };
        self.entries.write().insert(key, entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moscow() -> Vec<GeoCandidate> {
        vec![GeoCandidate {
            lat: Some(serde_json::json!("55.75")),
            lon: Some(serde_json::json!("37.61")),
            display_name: Some("Moscow, Russia".to_string()),
        }]
    }

    #[test]
    fn test_key_normalizes_query() {
        assert_eq!(CacheKey::new("  Moscow ", 1), CacheKey::new("moscow", 1));
        assert_ne!(CacheKey::new("moscow", 1), CacheKey::new("moscow", 5));
        assert_eq!(CacheKey::new(" MOSCOW", 5).to_string(), "coords:moscow:5");
    }

    #[test]
    fn test_get_returns_live_entry() {
        let cache = MemoryCache::new();
        cache.set(CacheKey::new("Moscow", 1), moscow(), Duration::from_secs(3600));

        assert_eq!(cache.get(&CacheKey::new("moscow", 1)), Some(moscow()));
        assert_eq!(cache.get(&CacheKey::new("moscow", 5)), None);
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let cache = MemoryCache::new();
        cache.set(CacheKey::new("moscow", 1), moscow(), Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get(&CacheKey::new("moscow", 1)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_zero_ttl_never_hits() {
        let cache = MemoryCache::new();
        cache.set(CacheKey::new("moscow", 1), moscow(), Duration::ZERO);
        assert_eq!(cache.get(&CacheKey::new("moscow", 1)), None);
    }

    #[test]
    fn test_set_overwrites() {
        let cache = MemoryCache::new();
        let key = CacheKey::new("moscow", 1);
        cache.set(key.clone(), Vec::new(), Duration::from_secs(60));
        cache.set(key.clone(), moscow(), Duration::from_secs(60));

        assert_eq!(cache.get(&key), Some(moscow()));
        assert_eq!(cache.len(), 1);
    }
}
