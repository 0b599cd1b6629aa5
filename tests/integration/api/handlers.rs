// Integration tests for API handlers using HTTP requests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use time_progression::api::{create_router, AppState};
use time_progression::config::Config;
use time_progression::core::models::OutputFormat;
use time_progression::engine::FixedClock;
use tower::ServiceExt;

/// Sunday 2024-03-10 08:30:15 UTC (04:30:15 EDT in New York)
fn test_app(config: Config) -> Router {
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 8, 30, 15).unwrap();
    let app_state = AppState::new(config, Arc::new(FixedClock(instant)));
    create_router(&app_state)
}

async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_returns_200() {
    let response = get(test_app(Config::test_config()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_seconds_with_explicit_timezone() {
    let response = get(
        test_app(Config::test_config()),
        "/api/second?timezone=America/New_York",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let day = 4.0 * 3600.0 + 30.0 * 60.0 + 15.0;
    assert_eq!(json["timezone"], "America/New_York");
    assert_eq!(json["timestamp"], "Sun, 10 Mar 2024 04:30:15 EDT");
    assert_eq!(json["result"]["minute"], 15.0);
    assert_eq!(json["result"]["day"], day);
    assert_eq!(json["result"]["week"], 6.0 * 86_400.0 + day);
}

#[tokio::test]
async fn test_missing_timezone_uses_configured_default() {
    let mut config = Config::test_config();
    config.default_timezone = "Asia/Tokyo".to_string();

    let response = get(test_app(config), "/api/percent").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["timezone"], "Asia/Tokyo");
    assert_eq!(json["timestamp"], "Sun, 10 Mar 2024 17:30:15 JST");
}

#[tokio::test]
async fn test_empty_timezone_uses_configured_default() {
    let response = get(test_app(Config::test_config()), "/api/second?timezone=").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["timezone"], "UTC");
}

#[tokio::test]
async fn test_default_format_route() {
    let mut config = Config::test_config();
    config.default_format = OutputFormat::Seconds;

    let response = get(test_app(config), "/api?timezone=UTC").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["minute"], 15.0);
}

#[tokio::test]
async fn test_percent_values_in_range() {
    let response = get(test_app(Config::test_config()), "/api/percent?timezone=UTC").await;
    let json = body_json(response).await;
    for field in ["year", "month", "week", "day", "hour", "minute"] {
        let value = json["result"][field].as_f64().unwrap();
        assert!((0.0..100.0).contains(&value), "{} = {}", field, value);
    }
    assert_eq!(json["result"]["minute"], 25.0);
}

#[tokio::test]
async fn test_rounding_parameter() {
    let response = get(
        test_app(Config::test_config()),
        "/api/percent?timezone=UTC&rounding=floor",
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // 08:30:15 is 35.43...% through the day
    assert_eq!(json["result"]["day"], 35.0);
}

#[tokio::test]
async fn test_unknown_rounding_rejected() {
    let response = get(
        test_app(Config::test_config()),
        "/api/percent?rounding=sideways",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid rounding");
}

#[tokio::test]
async fn test_invalid_timezone_returns_400() {
    let response = get(
        test_app(Config::test_config()),
        "/api/second?timezone=Nowhere/Place",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid timezone");
    assert!(json.get("result").is_none());
}

#[tokio::test]
async fn test_invalid_format_returns_400() {
    let response = get(test_app(Config::test_config()), "/api/fortnight").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "invalid format");
}

#[tokio::test]
async fn test_error_carries_request_id() {
    let request = Request::builder()
        .uri("/api/fortnight")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = test_app(Config::test_config()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers().get("x-request-id").unwrap(), "req-42");
    let json = body_json(response).await;
    assert_eq!(json["request_id"], "req-42");
}

#[tokio::test]
async fn test_request_id_generated_when_absent() {
    let response = get(test_app(Config::test_config()), "/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_timezones_endpoint() {
    let response = get(test_app(Config::test_config()), "/timezones").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let zones = json.as_array().unwrap();
    assert!(zones.iter().any(|z| z == "America/New_York"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let response = get(test_app(Config::test_config()), "/v1/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
