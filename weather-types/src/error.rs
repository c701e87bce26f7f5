//! Error types for the FX weather service.

use crate::domain::{Currency, CurrencyPair};

/// Failures talking to the rate provider.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Provider returned status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Could not decode provider response: {0}")]
    Decode(String),

    #[error("Rate not available for {base} -> {quote}")]
    MissingRate { base: Currency, quote: Currency },
}

/// Failures of the key-value store behind the cache.
///
/// The cache never surfaces these; they only reach logs.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Cache entry codec error: {0}")]
    Codec(String),
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Codec(err.to_string())
    }
}

/// The only failure that aborts a refresh cycle.
#[derive(Debug, thiserror::Error)]
pub enum RefreshError {
    #[error("Failed to fetch current rate for {pair}: {source}")]
    CurrentRate {
        pair: CurrencyPair,
        #[source]
        source: FetchError,
    },
}

impl RefreshError {
    pub fn pair(&self) -> CurrencyPair {
        match self {
            RefreshError::CurrentRate { pair, .. } => *pair,
        }
    }
}
