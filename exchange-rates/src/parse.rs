//! Decoding of provider payloads.
//!
//! Both endpoints answer with a `rates` mapping: keyed directly by quote
//! currency for the latest rate, and keyed by date for a time series.

use serde_json::Value;
use weather_types::{Currency, CurrencyPair, FetchError, RateSeries};

/// Extracts the quote rate from a latest-rate payload.
pub fn parse_latest(body: &Value, pair: CurrencyPair) -> Result<f64, FetchError> {
    let rates = body
        .get("rates")
        .and_then(Value::as_object)
        .ok_or_else(|| FetchError::Decode("response has no rates mapping".into()))?;

    rates
        .get(pair.quote.code())
        .and_then(Value::as_f64)
        .filter(|rate| rate.is_finite())
        .ok_or(FetchError::MissingRate {
            base: pair.base,
            quote: pair.quote,
        })
}

/// Extracts one rate per day from a time-series payload, oldest first.
///
/// Days without a numeric value for `quote` are skipped. A payload without a
/// `rates` object yields an empty series.
pub fn parse_timeseries(body: &Value, quote: Currency) -> RateSeries {
    let Some(days) = body.get("rates").and_then(Value::as_object) else {
        tracing::warn!(%quote, "time series response has no rates mapping");
        return RateSeries::empty();
    };

    let mut dated: Vec<(&str, f64)> = days
        .iter()
        .filter_map(|(date, day)| {
            match day.get(quote.code()).and_then(Value::as_f64) {
                Some(rate) if rate.is_finite() => Some((date.as_str(), rate)),
                _ => {
                    tracing::debug!(date = %date, %quote, "skipping day without usable rate");
                    None
                }
            }
        })
        .collect();

    // ISO dates sort lexicographically.
    dated.sort_by(|a, b| a.0.cmp(b.0));
    dated.into_iter().map(|(_, rate)| rate).collect()
}
