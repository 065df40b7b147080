use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::sync::Arc;

use pogoda_weather::{ForecastResult, ForecastWindower, GeoCache, GeoResolver, GeoResult, MemoryCache};

use crate::{AppError, Config};

/// A resolved place together with its forecast window
#[derive(Debug, Clone, Serialize)]
pub struct Lookup {
    pub place: GeoResult,
    pub forecast: ForecastResult,
}

/// Application state: configuration plus the two weather services
pub struct App {
    config: Config,
    resolver: GeoResolver,
    windower: ForecastWindower,
}

impl App {
    /// Create an application from the validated on-disk configuration
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::from_config(config)?)
    }

    /// Create an application with a fresh process-wide geocode cache
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        Self::with_cache(config, Arc::new(MemoryCache::new()))
    }

    /// Create an application sharing an existing geocode cache
    pub fn with_cache(config: Config, cache: Arc<dyn GeoCache>) -> Result<Self, AppError> {
        let resolver = GeoResolver::new(config.geocoding.settings(), cache)?;
        let windower = ForecastWindower::new(config.forecast.settings())?;

        tracing::info!(
            "Weather services ready (geocoder: {}, forecast: {})",
            config.geocoding.base_url,
            config.forecast.base_url
        );

        Ok(Self {
            config,
            resolver,
            windower,
        })
    }

    /// Resolve `place` and fetch its forecast window.
    ///
    /// An unresolvable place is `AppError::PlaceNotFound`; forecast failures
    /// are returned as `AppError::Weather`.
    pub async fn lookup(&self, place: &str, now: NaiveDateTime) -> Result<Lookup, AppError> {
        let resolved = self
            .resolver
            .resolve(place)
            .await
            .ok_or_else(|| AppError::PlaceNotFound(place.trim().to_string()))?;

        let forecast = self
            .windower
            .fetch_window(resolved.latitude, resolved.longitude, now)
            .await?;

        Ok(Lookup {
            place: resolved,
            forecast,
        })
    }

    /// Fetch the forecast window for coordinates picked from a suggestion,
    /// skipping geocoding.
    pub async fn lookup_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
        display_name: &str,
        now: NaiveDateTime,
    ) -> Result<Lookup, AppError> {
        let forecast = self.windower.fetch_window(latitude, longitude, now).await?;

        Ok(Lookup {
            place: GeoResult {
                latitude,
                longitude,
                display_name: display_name.trim().to_string(),
            },
            forecast,
        })
    }

    /// Autocomplete suggestions for a partially typed place name
    pub async fn suggest(&self, term: &str) -> Vec<GeoResult> {
        self.resolver
            .suggest(term, self.config.geocoding.suggestion_limit)
            .await
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }
}
