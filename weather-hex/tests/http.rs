//! Integration tests for the HTTP adapter.
//!
//! These drive the full router (service, cache and in-memory store) through
//! `tower::ServiceExt::oneshot`, with a stub rate source standing in for the
//! provider.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use weather_hex::comments::FixedSource;
use weather_hex::{ExpiringCache, ForecastService, inbound::HttpServer};
use weather_repo::MemoryStore;
use weather_types::{Currency, CurrencyPair, FetchError, Locale, RateSeries, RateSource};

/// Provider stub: fixed rates, optionally failing the USD current rate.
struct StubRates {
    fail_usd: bool,
}

#[async_trait]
impl RateSource for StubRates {
    async fn current_rate(&self, pair: CurrencyPair) -> Result<f64, FetchError> {
        match pair.base {
            Currency::JPY => Ok(0.0065),
            Currency::USD if self.fail_usd => Err(FetchError::Transport("connection reset".into())),
            _ => Ok(0.92),
        }
    }

    async fn historical_rates(&self, pair: CurrencyPair) -> RateSeries {
        match pair.base {
            Currency::JPY => RateSeries::new(vec![0.0062, 0.0062]),
            _ => RateSeries::new(vec![0.93, 0.93]),
        }
    }
}

fn app(fail_usd: bool) -> axum::Router {
    let service = ForecastService::new(
        StubRates { fail_usd },
        ExpiringCache::new(MemoryStore::new()),
    )
    .with_locale(Locale::En)
    .with_random_source(Arc::new(FixedSource(0)));
    HttpServer::new(service).router()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = app(false).oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_forecast_ready() {
    let response = app(false).oneshot(get("/api/forecast")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ready");
    let pairs = json["report"]["pairs"].as_array().unwrap();
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0]["id"], "jpy");
    assert_eq!(pairs[0]["weather"], "sunny");
    assert_eq!(pairs[0]["rate"], "153.85");
    assert_eq!(pairs[0]["difference"], "+4.84%");
    assert_eq!(pairs[1]["weather"], "rainy");
    assert_eq!(pairs[1]["rate"], "0.9200");
    assert_eq!(pairs[1]["trend"], "negative");
}

#[tokio::test]
async fn test_forecast_error_reports_no_pairs() {
    let response = app(true).oneshot(get("/api/forecast")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["status"], "error");
    assert!(json["message"].as_str().unwrap().contains("USD/EUR"));
    assert!(json.get("report").is_none());
}

#[tokio::test]
async fn test_forecast_language_override() {
    let response = app(false)
        .oneshot(get("/api/forecast?lang=ja"))
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["report"]["locale"], "ja");
    assert_eq!(json["report"]["pairs"][1]["label"], "米ドル → ユーロ");
}

#[tokio::test]
async fn test_language_accepts_region_and_case_variants() {
    for (lang, expected) in [("EN", "en"), ("ja-JP", "ja"), ("en-US", "en")] {
        let response = app(false)
            .oneshot(get(&format!("/api/forecast?lang={}", lang)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "lang={}", lang);
        assert_eq!(body_json(response).await["report"]["locale"], expected);
    }
}

#[tokio::test]
async fn test_unsupported_language_is_rejected() {
    let response = app(false)
        .oneshot(get("/api/forecast?lang=fr"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_renders_both_pairs() {
    let response = app(false).oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"id="jpy-rate""#));
    assert!(html.contains(r#"id="usd-rate""#));
    assert!(html.contains("153.85"));
    assert!(html.contains(r#"id="updated-at""#));
    assert!(!html.contains(r#"id="error""#));
}

#[tokio::test]
async fn test_page_renders_failure_only() {
    let response = app(true).oneshot(get("/?lang=en")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains(r#"id="error""#));
    assert!(!html.contains(r#"id="jpy-rate""#));
    assert!(!html.contains(r#"id="usd-rate""#));
}

#[tokio::test]
async fn test_openapi_document() {
    let response = app(false)
        .oneshot(get("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/forecast"].is_object());
}
