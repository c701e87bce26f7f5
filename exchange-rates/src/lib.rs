//! Exchange Rates Client
//!
//! Fetches current and historical exchange rates from a Frankfurter-compatible
//! REST API and exposes them through the [`RateSource`] port.
//!
//! The two reads have different failure contracts:
//! - [`RatesClient::fetch_current_rate`] returns a `Result` and propagates
//!   every failure to the caller.
//! - [`RatesClient::fetch_historical_rates`] always returns a [`RateSeries`];
//!   unusable days are skipped and a failed request yields an empty series.
//!
//! # Example
//! ```no_run
//! use exchange_rates::RatesClient;
//! use weather_types::CurrencyPair;
//!
//! # async fn run() -> Result<(), weather_types::FetchError> {
//! let client = RatesClient::new("https://api.frankfurter.app");
//! let now = client.fetch_current_rate(CurrencyPair::JPY_EUR).await?;
//! let history = client.fetch_historical_rates(CurrencyPair::JPY_EUR).await;
//! println!("{} vs {}", now, history.average());
//! # Ok(())
//! # }
//! ```
//!
//! [`RateSource`]: weather_types::RateSource
//! [`RateSeries`]: weather_types::RateSeries

mod client;
pub mod parse;
mod window;

pub use client::{DEFAULT_BASE_URL, DEFAULT_HISTORY_DAYS, RatesClient};
pub use window::HistoryWindow;
