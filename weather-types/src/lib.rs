//! # Weather Types
//!
//! Domain types and port traits for the FX weather service.
//! This crate has ZERO external IO dependencies - only data structures,
//! the averaging and classification rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Currency, RateSeries, Weather, Locale)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Display fields and refresh outcomes handed to renderers
//! - `error/` - Fetch, storage and refresh error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Currency, CurrencyPair, Locale, RateSeries, RateSnapshot, Thresholds, Trend, Weather,
};
pub use dto::*;
pub use error::{FetchError, RefreshError, StorageError};
pub use ports::{KeyValueStore, RateSource};
