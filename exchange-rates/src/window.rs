//! Date range for historical requests.

use std::fmt;

use chrono::{NaiveDate, TimeDelta, Utc};

/// Inclusive range of calendar days, rendered as `{start}..{end}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl HistoryWindow {
    /// The window of `days` days ending on `end`.
    ///
    /// Returns `None` when `days` is negative or reaches past the calendar range.
    pub fn trailing(end: NaiveDate, days: i64) -> Option<Self> {
        if days < 0 {
            return None;
        }
        let start = end.checked_sub_signed(TimeDelta::try_days(days)?)?;
        Some(Self { start, end })
    }

    /// The window of `days` days ending today (UTC).
    pub fn ending_today(days: i64) -> Option<Self> {
        Self::trailing(Utc::now().date_naive(), days)
    }
}

impl fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}
