//! Integration tests for the timezone and forecast clients using wiremock.

use tempcast_core::{
    Config, Location, LookupError, fetch_forecast, fetcher_from_config, resolver_from_config,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn forecast_body(dates: &[&str], max: &[f64], min: &[f64]) -> serde_json::Value {
    serde_json::json!({
        "latitude": 52.52,
        "longitude": 13.419998,
        "generationtime_ms": 0.05,
        "utc_offset_seconds": 7200,
        "timezone": "Europe/Berlin",
        "timezone_abbreviation": "CEST",
        "elevation": 38.0,
        "daily_units": {
            "time": "iso8601",
            "temperature_2m_min": "°C",
            "temperature_2m_max": "°C"
        },
        "daily": {
            "time": dates,
            "temperature_2m_min": min,
            "temperature_2m_max": max
        }
    })
}

fn config_for(timezone: &MockServer, forecast: &MockServer) -> Config {
    let mut cfg = Config::default();
    cfg.timezone.base_url = format!("{}/timezoneJSON", timezone.uri());
    cfg.set_geonames_username("tester".into());
    cfg.forecast.base_url = format!("{}/v1/forecast", forecast.uri());
    cfg
}

async fn run(cfg: &Config, location: &str) -> anyhow::Result<tempcast_core::ForecastResult> {
    let location: Location = location.parse()?;
    let resolver = resolver_from_config(cfg)?;
    let fetcher = fetcher_from_config(cfg);
    fetch_forecast(&location, resolver.as_ref(), fetcher.as_ref()).await
}

#[tokio::test]
async fn test_forecast_success_sends_expected_queries() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .and(query_param("lat", "52.52"))
        .and(query_param("lng", "13.41"))
        .and(query_param("username", "tester"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timezoneId": "Europe/Berlin",
            "countryCode": "DE"
        })))
        .expect(1)
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "52.52"))
        .and(query_param("longitude", "13.41"))
        .and(query_param("timezone", "Europe/Berlin"))
        .and(query_param("daily", "temperature_2m_min,temperature_2m_max"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(
            &["2024-06-01", "2024-06-02", "2024-06-03"],
            &[100.0, 20.0, 0.0],
            &[-40.0, 10.0, 0.0],
        )))
        .expect(1)
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let result = run(&cfg, "52.52,13.41").await.unwrap();

    assert_eq!(result.timezone, "Europe/Berlin");
    assert_eq!(result.timezone_abbreviation, "CEST");
    assert_eq!(result.utc_offset_seconds, 7200);

    let days: Vec<_> = result.daily.days().collect();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0].max_f(), Some(212.0));
    assert_eq!(days[0].min_f(), Some(-40.0));
    assert_eq!(days[2].max_f(), Some(32.0));
}

#[tokio::test]
async fn test_missing_timezone_skips_forecast() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": { "message": "user account not enabled to use the free webservice", "value": 10 }
        })))
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<LookupError>(),
        Some(&LookupError::MissingTimezone {
            reason: Some("user account not enabled to use the free webservice".into())
        })
    );
}

#[tokio::test]
async fn test_timezone_http_error_is_recoverable() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("503"), "Error should mention the status: {msg}");
    assert!(msg.contains("service unavailable"));
    assert!(err.downcast_ref::<LookupError>().is_none());
}

#[tokio::test]
async fn test_malformed_forecast_json_is_recoverable() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timezoneId": "Europe/Berlin" })),
        )
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"latitude\": 52.5,"))
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    assert!(err.to_string().contains("Failed to parse Open-Meteo forecast JSON"));
}

#[tokio::test]
async fn test_forecast_http_error_includes_body() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timezoneId": "Not/AZone" })),
        )
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": true,
            "reason": "Invalid timezone"
        })))
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("400"), "Error should mention the status: {msg}");
    assert!(msg.contains("Invalid timezone"));
}

#[tokio::test]
async fn test_misaligned_series_is_rejected() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timezoneId": "Europe/Berlin" })),
        )
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(
            &["2024-06-01", "2024-06-02"],
            &[20.0],
            &[10.0, 11.0],
        )))
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<LookupError>(),
        Some(&LookupError::MisalignedSeries { dates: 2, max: 1, min: 2 })
    );
}

#[tokio::test]
async fn test_null_temperatures_are_missing_readings() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timezoneId": "Europe/Berlin" })),
        )
        .mount(&timezone)
        .await;

    let mut body = forecast_body(&["2024-06-01", "2024-06-02"], &[21.5, 24.0], &[11.2, 12.9]);
    body["daily"]["temperature_2m_min"][1] = serde_json::Value::Null;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let result = run(&cfg, "52.52,13.41").await.unwrap();

    let days: Vec<_> = result.daily.days().collect();
    assert_eq!(days.len(), 2);
    assert_eq!(days[1].max_c, Some(24.0));
    assert_eq!(days[1].min_c, None);
}

#[tokio::test]
async fn test_empty_daily_series_is_accepted() {
    let timezone = MockServer::start().await;
    let forecast = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timezoneJSON"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "timezoneId": "Europe/Berlin" })),
        )
        .mount(&timezone)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[], &[], &[])))
        .mount(&forecast)
        .await;

    let cfg = config_for(&timezone, &forecast);
    let result = run(&cfg, "52.52,13.41").await.unwrap();

    assert!(result.daily.is_empty());
    assert_eq!(result.elevation, 38.0);
}

#[tokio::test]
async fn test_unreachable_service_is_recoverable() {
    let mut cfg = Config::default();
    // Port 9 (discard) is closed on test hosts.
    cfg.timezone.base_url = "http://127.0.0.1:9/timezoneJSON".into();

    let err = run(&cfg, "52.52,13.41").await.unwrap_err();

    assert!(err.to_string().contains("Failed to send request to GeoNames"));
}
