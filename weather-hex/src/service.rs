//! Forecast Application Service
//!
//! Orchestrates one refresh cycle: fetch through the cache, average,
//! classify, pick a comment and build display fields for every pair.
//! Contains NO infrastructure logic - pure orchestration over the ports.

use std::sync::Arc;

use chrono::{Local, Utc};

use weather_types::{
    CurrencyPair, DisplayFields, ForecastReport, KeyValueStore, Locale, RateSnapshot, RateSource,
    RefreshError, RefreshOutcome, Thresholds,
};

use crate::cache::{ExpiringCache, current_rate_key, history_key};
use crate::comments::{CommentSelector, RandomSource};
use crate::presenter::{Precision, Presenter};

/// Application service for forecast refreshes.
///
/// Generic over the rate source and the cache store - adapters are injected
/// at compile time, so tests run against in-memory fakes.
pub struct ForecastService<R: RateSource, S: KeyValueStore> {
    rates: R,
    cache: ExpiringCache<S>,
    comments: CommentSelector,
    presenter: Presenter,
    thresholds: Thresholds,
    locale: Locale,
}

impl<R: RateSource, S: KeyValueStore> ForecastService<R, S> {
    /// Creates a service with default thresholds, precision and locale.
    pub fn new(rates: R, cache: ExpiringCache<S>) -> Self {
        Self {
            rates,
            cache,
            comments: CommentSelector::default(),
            presenter: Presenter::default(),
            thresholds: Thresholds::default(),
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_random_source(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.comments = CommentSelector::new(random);
        self
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.presenter = Presenter::new(precision);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn cache(&self) -> &ExpiringCache<S> {
        &self.cache
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Refresh cycle
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs a refresh cycle in the default locale.
    pub async fn refresh(&self) -> Result<ForecastReport, RefreshError> {
        self.refresh_in(self.locale).await
    }

    /// Runs a refresh cycle.
    ///
    /// Both pairs are resolved concurrently. A failed current-rate fetch for
    /// either pair fails the whole cycle; nothing is rendered partially.
    pub async fn refresh_in(&self, locale: Locale) -> Result<ForecastReport, RefreshError> {
        let [first, second] = CurrencyPair::supported();
        let (first, second) = tokio::try_join!(self.resolve(first), self.resolve(second))?;

        let pairs = vec![self.forecast(locale, &first), self.forecast(locale, &second)];
        let generated_at = Utc::now();

        Ok(ForecastReport {
            pairs,
            updated_at: locale.format_timestamp(&generated_at.with_timezone(&Local)),
            locale,
            generated_at,
        })
    }

    /// Runs a refresh cycle and folds the result into the ready/error signal.
    pub async fn refresh_outcome(&self, locale: Locale) -> RefreshOutcome {
        match self.refresh_in(locale).await {
            Ok(report) => {
                tracing::info!(updated_at = %report.updated_at, "forecast ready");
                RefreshOutcome::Ready { report }
            }
            Err(err) => {
                tracing::error!(error = %err, "forecast refresh failed");
                RefreshOutcome::Error {
                    message: err.to_string(),
                }
            }
        }
    }

    /// Fetches the current rate and the history of one pair, both through the cache.
    async fn resolve(&self, pair: CurrencyPair) -> Result<RateSnapshot, RefreshError> {
        let current_key = current_rate_key(pair);
        let series_key = history_key(pair);

        let current = async {
            self.cache
                .try_fetch_with_cache(&current_key, || self.rates.current_rate(pair))
                .await
                .map_err(|source| RefreshError::CurrentRate { pair, source })
        };
        let history = async {
            let series = self
                .cache
                .fetch_with_cache(&series_key, || self.rates.historical_rates(pair))
                .await;
            Ok::<_, RefreshError>(series)
        };

        let (current, history) = tokio::try_join!(current, history)?;
        Ok(RateSnapshot::new(pair, current, history))
    }

    /// Average, classification, comment and display fields for one pair.
    fn forecast(&self, locale: Locale, snapshot: &RateSnapshot) -> DisplayFields {
        let series = snapshot.comparison_series();
        let average = series.average();
        let weather = self.thresholds.classify(snapshot.current, average);
        let comment = self.comments.pick(locale, weather);

        tracing::debug!(
            pair = %snapshot.pair,
            current = snapshot.current,
            average,
            days = snapshot.history.len(),
            %weather,
            "classified pair"
        );

        self.presenter.present(
            locale,
            snapshot.pair,
            snapshot.current,
            average,
            weather,
            comment,
        )
    }
}
