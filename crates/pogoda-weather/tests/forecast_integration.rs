//! Integration tests for ForecastWindower using wiremock.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use pogoda_weather::{ForecastSettings, ForecastWindower, Language, WeatherError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn windower(server: &MockServer) -> ForecastWindower {
    ForecastWindower::new(ForecastSettings {
        base_url: server.uri(),
        timeout: Duration::from_millis(500),
        language: Language::En,
    })
    .unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// Open-Meteo style payload with `hours` samples starting at 2024-01-01T00:00
fn payload(hours: usize) -> serde_json::Value {
    let time: Vec<String> = (0..hours)
        .map(|h| format!("2024-01-{:02}T{:02}:00", 1 + h / 24, h % 24))
        .collect();
    let temperature: Vec<f64> = (0..hours).map(|h| h as f64 / 10.0).collect();
    let codes: Vec<i32> = (0..hours).map(|h| if h % 2 == 0 { 0 } else { 999 }).collect();
    serde_json::json!({
        "latitude": 55.75,
        "longitude": 37.625,
        "timezone": "Europe/Moscow",
        "current_weather": {
            "time": "2024-01-01T11:15",
            "temperature": -4.2,
            "windspeed": 12.3,
            "winddirection": 250,
            "weathercode": 3,
            "is_day": 1
        },
        "hourly_units": {"time": "iso8601", "temperature_2m": "°C"},
        "hourly": {
            "time": time,
            "temperature_2m": temperature,
            "precipitation": vec![0.1; hours],
            "wind_speed_10m": vec![7.5; hours],
            "weathercode": codes
        }
    })
}

#[tokio::test]
async fn test_fetch_window_sends_expected_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "55.75"))
        .and(query_param("longitude", "37.62"))
        .and(query_param("current_weather", "true"))
        .and(query_param("hourly", "temperature_2m,weathercode,precipitation,wind_speed_10m"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(72)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(11, 15))
        .await
        .unwrap();

    assert_eq!(result.hourly.len(), 24);
}

#[tokio::test]
async fn test_window_aligned_to_current_hour() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(72)))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(11, 15))
        .await
        .unwrap();

    let first = &result.hourly[0];
    assert_eq!(first.timestamp, at(11, 0));
    assert_eq!(first.temperature, Some(1.1));
    assert_eq!(first.condition_code, Some(999));
    assert_eq!(first.condition_label, "Unknown");
    assert_eq!(result.hourly[1].condition_label, "Clear");
    assert_eq!(result.hourly[23].timestamp, at(10, 0) + chrono::Duration::days(1));
}

#[tokio::test]
async fn test_current_conditions_pass_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(24)))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(11, 15))
        .await
        .unwrap();

    assert_eq!(result.current["temperature"], serde_json::json!(-4.2));
    assert_eq!(result.current["winddirection"], serde_json::json!(250));
    assert_eq!(result.current.len(), 6);
    // 24 samples, current hour at index 11
    assert_eq!(result.hourly.len(), 13);
}

#[tokio::test]
async fn test_missing_hour_starts_at_series_beginning() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(30)))
        .mount(&mock_server)
        .await;

    let now = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 15, 0)
        .unwrap();
    let result = windower(&mock_server).fetch_window(55.75, 37.62, now).await.unwrap();

    assert_eq!(result.hourly.len(), 24);
    assert_eq!(result.hourly[0].timestamp, at(0, 0));
}

#[tokio::test]
async fn test_null_values_pass_through_as_none() {
    let mock_server = MockServer::start().await;

    let mut body = payload(48);
    body["hourly"]["precipitation"][47] = serde_json::Value::Null;
    body["hourly"]["temperature_2m"][3] = serde_json::Value::Null;
    body["hourly"]["weathercode"][4] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(0, 10))
        .await
        .unwrap();

    assert_eq!(result.hourly.len(), 24);
    assert!(result.hourly.iter().all(|s| s.precipitation == Some(0.1)));
    assert_eq!(result.hourly[3].temperature, None);
    assert_eq!(result.hourly[4].condition_code, None);
    assert_eq!(result.hourly[4].condition_label, "Unknown");
}

#[tokio::test]
async fn test_empty_hourly_gives_empty_window() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {"temperature": 1.0},
            "hourly": {"time": [], "temperature_2m": [], "precipitation": [], "wind_speed_10m": [], "weathercode": []}
        })))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(0.0, 0.0, at(11, 15))
        .await
        .unwrap();

    assert!(result.hourly.is_empty());
    assert_eq!(result.current.len(), 1);
}

#[tokio::test]
async fn test_missing_sections_give_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server)
        .fetch_window(0.0, 0.0, at(11, 15))
        .await
        .unwrap();

    assert!(result.current.is_empty());
    assert!(result.hourly.is_empty());
}

#[tokio::test]
async fn test_timeout_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(payload(24))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server).fetch_window(55.75, 37.62, at(11, 15)).await;

    assert!(matches!(result, Err(WeatherError::Timeout)), "got {:?}", result);
}

#[tokio::test]
async fn test_api_error_reason_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Latitude must be in range of -90 to 90°. Given: 123.0."
        })))
        .mount(&mock_server)
        .await;

    let result = windower(&mock_server).fetch_window(123.0, 0.0, at(11, 15)).await;

    match result {
        Err(WeatherError::Api { status, reason }) => {
            assert_eq!(status, 400);
            assert!(reason.starts_with("Latitude must be in range"));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&mock_server)
        .await;

    let err = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(11, 15))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Api { status: 502, ref reason } if reason == "Bad Gateway"));
}

#[tokio::test]
async fn test_malformed_payload_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"hourly\": 5}"))
        .mount(&mock_server)
        .await;

    let err = windower(&mock_server)
        .fetch_window(55.75, 37.62, at(11, 15))
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Bind then release a port so nothing is listening on it
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let windower = ForecastWindower::new(ForecastSettings {
        base_url: format!("http://{}", addr),
        ..ForecastSettings::default()
    })
    .unwrap();
    let err = windower.fetch_window(55.75, 37.62, at(11, 15)).await.unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_russian_labels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload(24)))
        .mount(&mock_server)
        .await;

    let windower = ForecastWindower::new(ForecastSettings {
        base_url: mock_server.uri(),
        timeout: Duration::from_secs(5),
        language: Language::Ru,
    })
    .unwrap();
    let result = windower.fetch_window(55.75, 37.62, at(0, 5)).await.unwrap();

    assert_eq!(result.hourly[0].condition_label, "Ясно");
    assert_eq!(result.hourly[1].condition_label, "Неизвестно");
}
