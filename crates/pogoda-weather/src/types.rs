use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Raw geocoder record, cached exactly as the provider returned it.
///
/// Nominatim reports coordinates as decimal strings; numbers are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoCandidate {
    #[serde(default)]
    pub lat: Option<Value>,
    #[serde(default)]
    pub lon: Option<Value>,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl GeoCandidate {
    pub fn latitude(&self) -> Option<f64> {
        self.lat.as_ref().and_then(coordinate)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.lon.as_ref().and_then(coordinate)
    }

    /// Build a `GeoResult` if both coordinates are usable.
    /// `fallback_name` is used when the record carries no display name.
    pub fn to_geo_result(&self, fallback_name: &str) -> Option<GeoResult> {
        let latitude = self.latitude()?;
        let longitude = self.longitude()?;
        let display_name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| fallback_name.trim())
            .to_string();

        Some(GeoResult {
            latitude,
            longitude,
            display_name,
        })
    }
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Resolved place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

/// Hourly arrays as returned by the forecast provider. All arrays share the
/// index of `time`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub wind_speed_10m: Vec<Option<f64>>,
    #[serde(default, alias = "weather_code")]
    pub weathercode: Vec<Option<i32>>,
}

/// Hourly forecast entry. Values the provider reports as `null` are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    pub timestamp: NaiveDateTime,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
    pub wind_speed: Option<f64>,
    pub condition_code: Option<i32>,
    pub condition_label: String,
}

/// Current conditions plus the aligned hourly window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Provider's current-conditions object, passed through untouched
    pub current: Map<String, Value>,
    pub hourly: Vec<HourlySample>,
}

/// Forecast errors. Geocoding never produces these; its failures are
/// absorbed into empty results.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Forecast request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(reqwest::Error),
    #[error("Forecast API error ({status}): {reason}")]
    Api { status: u16, reason: String },
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WeatherError::Timeout
        } else if e.is_decode() {
            WeatherError::Parse(e.to_string())
        } else {
            WeatherError::Network(e)
        }
    }
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Timeout => "The weather service took too long to respond. Please try again.",
            WeatherError::Network(_) => "Unable to reach the weather service. Check your connection.",
            WeatherError::Api { status, .. } if *status >= 500 => {
                "The weather service is experiencing issues. Please try again later."
            }
            WeatherError::Api { .. } => "The weather service rejected the request.",
            WeatherError::Parse(_) => "Received an unexpected forecast. Please try again.",
        }
    }
}
