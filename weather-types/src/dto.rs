//! Data Transfer Objects handed to renderers and API clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CurrencyPair, Locale, Trend, Weather};

// ─────────────────────────────────────────────────────────────────────────────
// Per-pair display
// ─────────────────────────────────────────────────────────────────────────────

/// Display-ready fields for one currency pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DisplayFields {
    /// Identifier prefix for rendered elements
    #[schema(example = "jpy")]
    pub id: String,
    pub pair: CurrencyPair,
    #[schema(example = "JPY → EUR")]
    pub label: String,
    #[schema(example = "☀️")]
    pub icon: String,
    /// Rounded rate, inverted for pairs displayed base-per-quote
    #[schema(example = "153.85")]
    pub rate: String,
    #[schema(example = "¥/€")]
    pub unit: String,
    /// Signed percentage against the average, or a localized sentinel
    #[schema(example = "+4.84%")]
    pub difference: String,
    pub trend: Trend,
    pub weather: Weather,
    pub comment: String,
}

impl DisplayFields {
    /// Rate with its unit suffix appended.
    pub fn rate_with_unit(&self) -> String {
        format!("{} {}", self.rate, self.unit)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Refresh results
// ─────────────────────────────────────────────────────────────────────────────

/// Result of a successful refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ForecastReport {
    /// One entry per supported pair, in display order
    pub pairs: Vec<DisplayFields>,
    /// Localized "last updated" text
    #[schema(example = "2024-05-10 09:03:07")]
    pub updated_at: String,
    pub locale: Locale,
    pub generated_at: DateTime<Utc>,
}

impl ForecastReport {
    pub fn pair(&self, id: &str) -> Option<&DisplayFields> {
        self.pairs.iter().find(|p| p.id == id)
    }
}

/// The single signal a refresh cycle emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RefreshOutcome {
    Ready { report: ForecastReport },
    Error { message: String },
}

impl RefreshOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, RefreshOutcome::Ready { .. })
    }
}
