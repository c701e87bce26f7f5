//! Classification of a current rate against its trailing average.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Qualitative verdict on whether now is a good time to exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
        }
    }

    /// Glyph shown next to the rate.
    pub fn icon(&self) -> &'static str {
        match self {
            Weather::Sunny => "☀️",
            Weather::Cloudy => "☁️",
            Weather::Rainy => "🌧️",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative deviation bands. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// `d >= sunny` classifies as sunny.
    pub sunny: f64,
    /// `d <= rainy` classifies as rainy.
    pub rainy: f64,
}

impl Thresholds {
    pub const SUNNY: f64 = 0.01;
    pub const RAINY: f64 = -0.01;

    pub fn new(sunny: f64, rainy: f64) -> Self {
        Self { sunny, rainy }
    }

    /// Classifies `current` against `average`.
    ///
    /// A zero average leaves the deviation undefined; that case, like any
    /// non-finite deviation, is cloudy.
    pub fn classify(&self, current: f64, average: f64) -> Weather {
        if average == 0.0 {
            return Weather::Cloudy;
        }
        let deviation = (current - average) / average;
        if !deviation.is_finite() {
            return Weather::Cloudy;
        }
        if deviation >= self.sunny {
            Weather::Sunny
        } else if deviation <= self.rainy {
            Weather::Rainy
        } else {
            Weather::Cloudy
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(Self::SUNNY, Self::RAINY)
    }
}

/// Classifies with the default 1% bands.
pub fn classify(current: f64, average: f64) -> Weather {
    Thresholds::default().classify(current, average)
}

/// Direction of the current rate relative to the average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Neutral,
}

impl Trend {
    /// Neutral when the average is zero, whatever the current rate.
    pub fn between(current: f64, average: f64) -> Self {
        if average == 0.0 {
            Trend::Neutral
        } else if current > average {
            Trend::Positive
        } else if current < average {
            Trend::Negative
        } else {
            Trend::Neutral
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Trend::Positive => "positive",
            Trend::Negative => "negative",
            Trend::Neutral => "neutral",
        }
    }
}
