//! Domain models for the FX weather service.

pub mod currency;
pub mod locale;
pub mod series;
pub mod weather;

pub use currency::{Currency, CurrencyPair};
pub use locale::Locale;
pub use series::{RateSeries, RateSnapshot};
pub use weather::{Thresholds, Trend, Weather};
