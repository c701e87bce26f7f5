//! Historical rate series and the averaging rule.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyPair;

/// Ordered daily rates, oldest first. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct RateSeries(Vec<f64>);

impl RateSeries {
    pub fn new(rates: Vec<f64>) -> Self {
        Self(rates)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Arithmetic mean of the series; `0.0` for an empty series.
    pub fn average(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        self.0.iter().sum::<f64>() / self.0.len() as f64
    }

    /// Replaces an empty series with `[current]`, so that the average equals
    /// today's rate instead of zero.
    pub fn or_current(self, current: f64) -> Self {
        if self.is_empty() {
            Self(vec![current])
        } else {
            self
        }
    }
}

impl From<Vec<f64>> for RateSeries {
    fn from(rates: Vec<f64>) -> Self {
        Self(rates)
    }
}

impl FromIterator<f64> for RateSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything a refresh cycle resolved for one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RateSnapshot {
    pub pair: CurrencyPair,
    pub current: f64,
    pub history: RateSeries,
}

impl RateSnapshot {
    pub fn new(pair: CurrencyPair, current: f64, history: RateSeries) -> Self {
        Self {
            pair,
            current,
            history,
        }
    }

    /// The series used for comparison, falling back to today's rate.
    pub fn comparison_series(&self) -> RateSeries {
        self.history.clone().or_current(self.current)
    }
}
