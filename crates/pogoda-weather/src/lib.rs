//! Weather lookup core for Pogoda
//!
//! Resolves place names through a Nominatim-compatible geocoder (cached) and
//! extracts a current-hour aligned window from an Open-Meteo hourly forecast.

pub mod cache;
pub mod condition;
pub mod forecast;
pub mod geocode;
pub mod types;
pub mod window;

pub use cache::{CacheKey, GeoCache, MemoryCache};
pub use condition::{Language, WeatherCondition};
pub use forecast::{ForecastSettings, ForecastWindower};
pub use geocode::{GeoResolver, GeocoderSettings};
pub use types::*;
pub use window::{alignment_timestamp, extract_window, start_index, WINDOW_HOURS};
