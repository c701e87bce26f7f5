//! HTTP client for the rate provider.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use weather_types::{CurrencyPair, FetchError, RateSeries, RateSource};

use crate::parse::{parse_latest, parse_timeseries};
use crate::window::HistoryWindow;

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";

/// Length of the trailing window compared against today's rate.
pub const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Rate provider client.
pub struct RatesClient {
    base_url: String,
    history_days: i64,
    http: Client,
}

impl RatesClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            history_days: DEFAULT_HISTORY_DAYS,
            http: Client::new(),
        }
    }

    /// Uses a preconfigured HTTP client (timeouts, proxies, user agent).
    pub fn with_http(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    /// Sets the length of the historical window.
    pub fn with_history_days(mut self, days: i64) -> Self {
        self.history_days = days;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the latest rate for `pair`.
    pub async fn fetch_current_rate(&self, pair: CurrencyPair) -> Result<f64, FetchError> {
        let body = self.get_json("latest", pair).await?;
        let rate = parse_latest(&body, pair)?;
        tracing::debug!(%pair, rate, "fetched current rate");
        Ok(rate)
    }

    /// Fetches the trailing window ending today.
    pub async fn fetch_historical_rates(&self, pair: CurrencyPair) -> RateSeries {
        match HistoryWindow::ending_today(self.history_days) {
            Some(window) => self.fetch_historical_rates_in(pair, window).await,
            None => {
                tracing::warn!(%pair, days = self.history_days, "history window out of range");
                RateSeries::empty()
            }
        }
    }

    /// Fetches the daily rates inside `window`. Failures yield an empty series.
    pub async fn fetch_historical_rates_in(
        &self,
        pair: CurrencyPair,
        window: HistoryWindow,
    ) -> RateSeries {
        match self.get_json(&window.to_string(), pair).await {
            Ok(body) => {
                let series = parse_timeseries(&body, pair.quote);
                tracing::debug!(%pair, %window, days = series.len(), "fetched historical rates");
                series
            }
            Err(err) => {
                tracing::warn!(%pair, %window, error = %err, "historical rates unavailable");
                RateSeries::empty()
            }
        }
    }

    async fn get_json(&self, path: &str, pair: CurrencyPair) -> Result<Value, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .query(&[("from", pair.base.code()), ("to", pair.quote.code())])
            .send()
            .await
            .map_err(transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await.map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> FetchError {
    FetchError::Transport(err.to_string())
}

#[async_trait]
impl RateSource for RatesClient {
    async fn current_rate(&self, pair: CurrencyPair) -> Result<f64, FetchError> {
        self.fetch_current_rate(pair).await
    }

    async fn historical_rates(&self, pair: CurrencyPair) -> RateSeries {
        self.fetch_historical_rates(pair).await
    }
}
