//! # Weather Hex
//!
//! Application service layer and HTTP adapter for the FX weather service.
//!
//! ## Architecture
//!
//! - `cache` - Expiring cache over the `KeyValueStore` port
//! - `comments` - Remark catalogue with an injectable random source
//! - `presenter` - Rounding, inversion and sign rules for display
//! - `service` - Refresh cycle orchestration
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: RateSource` and `S: KeyValueStore`,
//! allowing different adapters to be injected.

pub mod cache;
pub mod comments;
pub mod inbound;
pub mod openapi;
pub mod presenter;
pub mod service;


pub use cache::ExpiringCache;
pub use service::ForecastService;
