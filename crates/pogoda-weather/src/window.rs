//! Current-hour window over the provider's hourly series.
//!
//! The current hour is located by literal string comparison against the
//! provider's `YYYY-MM-DDTHH:00` keys. No datetime parsing or timezone
//! conversion happens during alignment; a stamp that does not match starts
//! the window at the beginning of the series.

use chrono::NaiveDateTime;

use crate::condition::{Language, WeatherCondition};
use crate::types::{HourlySample, HourlySeries, WeatherError};

/// Maximum number of samples in a window
pub const WINDOW_HOURS: usize = 24;

const HOUR_KEY_FORMAT: &str = "%Y-%m-%dT%H:00";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// `now` truncated to the hour, in the provider's key format.
pub fn alignment_timestamp(now: NaiveDateTime) -> String {
    now.format(HOUR_KEY_FORMAT).to_string()
}

/// Index of the current hour in `timestamps`, or 0 when it is not present.
pub fn start_index(timestamps: &[String], now: NaiveDateTime) -> usize {
    let key = alignment_timestamp(now);
    timestamps.iter().position(|t| *t == key).unwrap_or(0)
}

/// Join the parallel series into at most `WINDOW_HOURS` samples starting at
/// the current hour.
///
/// Fails only on a malformed payload: a value series too short to cover the
/// window or a timestamp that does not parse. A `null` value inside the
/// window becomes `None` on the sample; a `null` code is labelled unknown.
pub fn extract_window(
    series: &HourlySeries,
    now: NaiveDateTime,
    language: Language,
) -> Result<Vec<HourlySample>, WeatherError> {
    let start = start_index(&series.time, now);
    let end = (start + WINDOW_HOURS).min(series.time.len());

    tracing::debug!(
        "Forecast window {}..{} of {} (aligned to {})",
        start,
        end,
        series.time.len(),
        alignment_timestamp(now)
    );

    (start..end)
        .map(|i| sample_at(series, i, language))
        .collect()
}

fn sample_at(series: &HourlySeries, i: usize, language: Language) -> Result<HourlySample, WeatherError> {
    let raw_time = &series.time[i];
    let timestamp = NaiveDateTime::parse_from_str(raw_time, TIMESTAMP_FORMAT)
        .map_err(|e| WeatherError::Parse(format!("invalid timestamp {:?}: {}", raw_time, e)))?;

    let temperature = value_at(&series.temperature_2m, i, "temperature_2m")?;
    let precipitation = value_at(&series.precipitation, i, "precipitation")?;
    let wind_speed = value_at(&series.wind_speed_10m, i, "wind_speed_10m")?;
    let condition_code = value_at(&series.weathercode, i, "weathercode")?;

    Ok(HourlySample {
        timestamp,
        temperature,
        precipitation,
        wind_speed,
        condition_code,
        condition_label: condition_code
            .map_or(WeatherCondition::Unknown, WeatherCondition::from_wmo_code)
            .label(language)
            .to_string(),
    })
}

fn value_at<T: Copy>(values: &[Option<T>], i: usize, name: &str) -> Result<Option<T>, WeatherError> {
    values.get(i).copied().ok_or_else(|| {
        WeatherError::Parse(format!(
            "hourly.{} has {} values, expected at least {}",
            name,
            values.len(),
            i + 1
        ))
    })
}
