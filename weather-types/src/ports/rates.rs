//! Exchange rate provider port.
//!
//! The two reads have deliberately different error contracts: the current
//! rate is fallible, the historical series is not.

use std::sync::Arc;

use crate::domain::{CurrencyPair, RateSeries};
use crate::error::FetchError;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync {
    /// Quote units received for one base unit right now.
    async fn current_rate(&self, pair: CurrencyPair) -> Result<f64, FetchError>;

    /// Daily rates over the trailing window, oldest first.
    ///
    /// Never fails: unusable days are skipped and a failed request yields an
    /// empty series.
    async fn historical_rates(&self, pair: CurrencyPair) -> RateSeries;
}

#[async_trait::async_trait]
impl<T: RateSource + ?Sized> RateSource for Arc<T> {
    async fn current_rate(&self, pair: CurrencyPair) -> Result<f64, FetchError> {
        (**self).current_rate(pair).await
    }

    async fn historical_rates(&self, pair: CurrencyPair) -> RateSeries {
        (**self).historical_rates(pair).await
    }
}
