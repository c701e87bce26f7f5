//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use utoipa::{IntoParams, OpenApi};

use weather_types::{KeyValueStore, Locale, RateSource, RefreshError, RefreshOutcome};

use super::page;
use crate::ForecastService;
use crate::openapi::ApiDoc;

/// Application state shared across handlers.
pub struct AppState<R: RateSource, S: KeyValueStore> {
    pub service: ForecastService<R, S>,
}

/// Optional language override.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LocaleQuery {
    /// `ja` or `en` (case-insensitive, `ja-JP` and `en-US` accepted);
    /// defaults to the server's locale
    #[serde(default, deserialize_with = "parse_lang")]
    #[param(value_type = Option<String>)]
    pub lang: Option<Locale>,
}

/// Parses `lang` the same way as every other locale input.
fn parse_lang<'de, D>(deserializer: D) -> Result<Option<Locale>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw.parse().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Wrapper to implement IntoResponse for RefreshError (orphan rule workaround).
pub struct ApiError(pub RefreshError);

impl From<RefreshError> for ApiError {
    fn from(err: RefreshError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "forecast refresh failed");
        let body = RefreshOutcome::Error {
            message: self.0.to_string(),
        };
        (StatusCode::BAD_GATEWAY, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Runs a refresh cycle and returns the outcome as JSON.
#[tracing::instrument(skip(state))]
pub async fn forecast<R, S>(
    State(state): State<Arc<AppState<R, S>>>,
    Query(query): Query<LocaleQuery>,
) -> Result<Json<RefreshOutcome>, ApiError>
where
    R: RateSource + 'static,
    S: KeyValueStore,
{
    let locale = query.lang.unwrap_or(state.service.locale());
    let report = state.service.refresh_in(locale).await?;
    Ok(Json(RefreshOutcome::Ready { report }))
}

/// Runs a refresh cycle and renders the HTML page.
#[tracing::instrument(skip(state))]
pub async fn forecast_page<R, S>(
    State(state): State<Arc<AppState<R, S>>>,
    Query(query): Query<LocaleQuery>,
) -> Html<String>
where
    R: RateSource + 'static,
    S: KeyValueStore,
{
    let locale = query.lang.unwrap_or(state.service.locale());
    let outcome = state.service.refresh_outcome(locale).await;
    Html(page::render(locale, &outcome))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
