//! Maps computed rates onto display-ready fields.
//!
//! Percentages always come from the raw provider rates; only the displayed
//! rate of an inverted pair is flipped.

use weather_types::{CurrencyPair, DisplayFields, Locale, Trend, Weather};

/// Rounding applied to displayed numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision {
    /// Decimals for pairs shown base-per-quote.
    pub inverted_rate: usize,
    /// Decimals for pairs shown as quoted by the provider.
    pub direct_rate: usize,
    pub percent: usize,
}

impl Default for Precision {
    fn default() -> Self {
        Self {
            inverted_rate: 2,
            direct_rate: 4,
            percent: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Presenter {
    precision: Precision,
}

impl Presenter {
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    pub fn present(
        &self,
        locale: Locale,
        pair: CurrencyPair,
        current: f64,
        average: f64,
        weather: Weather,
        comment: &str,
    ) -> DisplayFields {
        DisplayFields {
            id: pair.id(),
            pair,
            label: locale.pair_label(pair),
            icon: weather.icon().to_string(),
            rate: self.format_rate(pair, current),
            unit: pair.unit_suffix(),
            difference: self.format_difference(locale, current, average),
            trend: Trend::between(current, average),
            weather,
            comment: comment.to_string(),
        }
    }

    /// Rounded rate, inverted for base-per-quote pairs unless it is zero.
    pub fn format_rate(&self, pair: CurrencyPair, current: f64) -> String {
        if pair.is_inverted_display() {
            let shown = if current == 0.0 { current } else { 1.0 / current };
            format!("{:.*}", self.precision.inverted_rate, shown)
        } else {
            format!("{:.*}", self.precision.direct_rate, current)
        }
    }

    /// Signed percentage of `current` against `average`.
    pub fn format_difference(&self, locale: Locale, current: f64, average: f64) -> String {
        if average == 0.0 {
            return locale.not_available().to_string();
        }
        let percent = (current - average) / average * 100.0;
        let sign = if percent >= 0.0 { "+" } else { "" };
        format!("{}{:.*}%", sign, self.precision.percent, percent)
    }
}
