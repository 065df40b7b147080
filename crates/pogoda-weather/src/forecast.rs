//! Open-Meteo forecast client.
//!
//! Unlike geocoding, every failure here is returned to the caller: there is
//! no sensible substitute for a missing forecast.

use std::time::Duration;

use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::condition::Language;
use crate::types::{ForecastResult, HourlySeries, WeatherError};
use crate::window::extract_window;

pub const OPEN_METEO_URL: &str = "https://api.open-meteo.com";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const HOURLY_FIELDS: &str = "temperature_2m,weathercode,precipitation,wind_speed_10m";

/// Connection settings for the forecast service
#[derive(Debug, Clone)]
pub struct ForecastSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub language: Language,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            language: Language::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current_weather: Map<String, Value>,
    #[serde(default)]
    hourly: HourlySeries,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ForecastWindower {
    client: Client,
    base_url: String,
    language: Language,
}

impl ForecastWindower {
    pub fn new(settings: ForecastSettings) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            language: settings.language,
        })
    }

    /// Fetch the forecast for a point and cut the hourly window at `now`.
    ///
    /// `now` is the caller's wall-clock time; it is compared against the
    /// provider's local-time keys as-is.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_window(
        &self,
        latitude: f64,
        longitude: f64,
        now: NaiveDateTime,
    ) -> Result<ForecastResult, WeatherError> {
        let payload = self.fetch(latitude, longitude).await?;
        let hourly = extract_window(&payload.hourly, now, self.language)?;

        tracing::info!(
            "Fetched forecast for ({}, {}): {} hourly samples",
            latitude,
            longitude,
            hourly.len()
        );

        Ok(ForecastResult {
            current: payload.current_weather,
            hourly,
        })
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<ForecastResponse, WeatherError> {
        let url = format!("{}/v1/forecast", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("current_weather", "true".to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|b| b.reason)
                .unwrap_or(text);
            tracing::warn!("Forecast returned status {}: {}", status, reason);
            return Err(WeatherError::Api {
                status: status.as_u16(),
                reason,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| WeatherError::Parse(format!("forecast payload: {}", e)))
    }
}
