//! # FX Weather Client SDK
//!
//! A typed Rust client for the FX weather API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use weather_types::{ForecastReport, Locale, RefreshOutcome};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// FX weather API client.
pub struct WeatherClient {
    base_url: String,
    http: Client,
}

impl WeatherClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Runs a refresh cycle on the server and returns the report.
    ///
    /// A failed cycle comes back as [`ClientError::Api`] with the server's message.
    pub async fn forecast(&self, lang: Option<Locale>) -> Result<ForecastReport, ClientError> {
        match self.forecast_outcome(lang).await? {
            RefreshOutcome::Ready { report } => Ok(report),
            RefreshOutcome::Error { message } => Err(ClientError::Api {
                status: 502,
                message,
            }),
        }
    }

    /// Runs a refresh cycle on the server and returns the raw outcome.
    pub async fn forecast_outcome(
        &self,
        lang: Option<Locale>,
    ) -> Result<RefreshOutcome, ClientError> {
        let path = match lang {
            Some(lang) => format!("/api/forecast?lang={}", lang),
            None => "/api/forecast".to_string(),
        };
        self.get(&path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let resp = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        let body = resp.text().await?;
        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        // A failed refresh still answers with an outcome document.
        let outcome = match status {
            reqwest::StatusCode::BAD_GATEWAY => serde_json::from_str::<T>(&body).ok(),
            _ => None,
        };
        if let Some(outcome) = outcome {
            return Ok(outcome);
        }

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or(body);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
