//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;

use weather_types::domain::{Currency, CurrencyPair, Locale, Trend, Weather};
use weather_types::dto::{DisplayFields, ForecastReport, RefreshOutcome};

use crate::inbound::LocaleQuery;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Run a refresh cycle and return the outcome
#[utoipa::path(
    get,
    path = "/api/forecast",
    tag = "forecast",
    params(LocaleQuery),
    responses(
        (status = 200, description = "Both pairs refreshed", body = RefreshOutcome),
        (status = 400, description = "Unsupported language"),
        (status = 502, description = "Rate provider failed; no pair is reported", body = RefreshOutcome)
    )
)]
async fn forecast() {}

/// Run a refresh cycle and render the HTML page
#[utoipa::path(
    get,
    path = "/",
    tag = "forecast",
    params(LocaleQuery),
    responses(
        (status = 200, description = "Forecast page, or the failure notice", content_type = "text/html", body = String)
    )
)]
async fn forecast_page() {}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "FX Weather API",
        version = "0.1.0",
        description = "Exchange rate forecasts for JPY and USD against EUR"
    ),
    paths(health, forecast, forecast_page),
    components(schemas(
        RefreshOutcome,
        ForecastReport,
        DisplayFields,
        CurrencyPair,
        Currency,
        Locale,
        Trend,
        Weather
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "forecast", description = "Exchange rate weather")
    )
)]
pub struct ApiDoc;
