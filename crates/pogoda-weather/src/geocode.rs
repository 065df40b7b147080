//! Forward geocoding: convert place names to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.
//!
//! Every provider failure is absorbed here and reported as "no results";
//! callers show "not found" instead of an error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::instrument;

use crate::cache::{CacheKey, GeoCache};
use crate::types::{GeoCandidate, GeoResult, WeatherError};

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";
pub const USER_AGENT: &str = concat!("pogoda/", env!("CARGO_PKG_VERSION"), " (weather lookup)");
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const CACHE_TTL: Duration = Duration::from_secs(3600);
pub const SUGGESTION_LIMIT: usize = 5;

/// Connection settings for the geocoding service
#[derive(Debug, Clone)]
pub struct GeocoderSettings {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: NOMINATIM_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            timeout: REQUEST_TIMEOUT,
            cache_ttl: CACHE_TTL,
        }
    }
}

#[derive(Clone)]
pub struct GeoResolver {
    client: Client,
    base_url: String,
    cache: Arc<dyn GeoCache>,
    cache_ttl: Duration,
}

impl std::fmt::Debug for GeoResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoResolver")
            .field("base_url", &self.base_url)
            .field("cache_ttl", &self.cache_ttl)
            .finish_non_exhaustive()
    }
}

impl GeoResolver {
    pub fn new(settings: GeocoderSettings, cache: Arc<dyn GeoCache>) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            cache,
            cache_ttl: settings.cache_ttl,
        })
    }

    /// Ranked candidates for `query`, most relevant first.
    ///
    /// Served from the cache when a live entry exists. Empty on any provider
    /// failure.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str, limit: usize) -> Vec<GeoCandidate> {
        let limit = limit.max(1);
        let key = CacheKey::new(query, limit);

        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("Geocode cache hit for {}", key);
            return cached;
        }
        tracing::debug!("Geocode cache miss for {}", key);

        let candidates = match self.fetch(query, limit).await {
            Some(c) => c,
            None => return Vec::new(),
        };

        // Only non-empty answers are remembered, so a miss is retried next time
        if !candidates.is_empty() {
            self.cache.set(key, candidates.clone(), self.cache_ttl);
        }
        candidates
    }

    async fn fetch(&self, query: &str, limit: usize) -> Option<Vec<GeoCandidate>> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();

        let response = match self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "json"), ("limit", limit.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!("Geocode returned status {}", response.status());
            return None;
        }

        match response.json::<Vec<GeoCandidate>>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Geocode parse error: {}", e);
                None
            }
        }
    }

    /// Top-ranked place for `query`, or `None` when nothing usable was found.
    pub async fn resolve(&self, query: &str) -> Option<GeoResult> {
        let candidates = self.search(query, 1).await;
        let place = candidates.first()?.to_geo_result(query);

        match &place {
            Some(p) => tracing::info!("Geocoded {:?} to {}", query.trim(), p.display_name),
            None => tracing::debug!("No usable geocode result for {:?}", query.trim()),
        }
        place
    }

    /// Coordinates of the top-ranked place for `query`.
    pub async fn resolve_coordinates(&self, query: &str) -> Option<(f64, f64)> {
        self.resolve(query)
            .await
            .map(|place| (place.latitude, place.longitude))
    }

    /// Autocomplete suggestions. Candidates without usable coordinates are skipped.
    pub async fn suggest(&self, term: &str, limit: usize) -> Vec<GeoResult> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        self.search(term, limit)
            .await
            .iter()
            .filter_map(|candidate| candidate.to_geo_result(term))
            .collect()
    }
}
