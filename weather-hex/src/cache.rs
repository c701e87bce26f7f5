//! Time-bound cache in front of the rate provider.
//!
//! Entries are stored in a [`KeyValueStore`] as JSON documents of the form
//! `{"payload": ..., "timestamp": <epoch millis>}`. Expiry is checked on read;
//! the store itself never expires anything. Storage problems of any kind are
//! logged and treated as a miss, so the cache can never block a fetch.
//!
//! Fetches through the cache are serialized per key: concurrent callers that
//! miss on the same key wait for the first fetch and then read its result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use weather_types::{CurrencyPair, KeyValueStore, StorageError};

/// Default freshness window: ten minutes.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(600);

// ─────────────────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────────────────

/// Source of the current time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Keys
// ─────────────────────────────────────────────────────────────────────────────

/// Key of the cached current rate for `pair`.
pub fn current_rate_key(pair: CurrencyPair) -> String {
    format!("fx-weather:current:{}:{}", pair.base, pair.quote)
}

/// Key of the cached historical series for `pair`.
pub fn history_key(pair: CurrencyPair) -> String {
    format!("fx-weather:history:{}:{}", pair.base, pair.quote)
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    payload: T,
    timestamp: i64,
}

pub struct ExpiringCache<S: KeyValueStore> {
    store: S,
    clock: Arc<dyn Clock>,
    freshness: Duration,
    /// One fetch lock per key
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl<S: KeyValueStore> ExpiringCache<S> {
    /// Creates a cache with the default window and the system clock.
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Arc::new(SystemClock),
            freshness: DEFAULT_FRESHNESS,
            locks: DashMap::new(),
        }
    }

    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }

    /// Returns the cached payload while it is fresh.
    ///
    /// A stale entry is evicted. Unreadable or undecodable entries read as a miss.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!(key, error = %err, "cache read failed");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring corrupt cache entry");
                return None;
            }
        };

        let age = self.clock.now_millis().saturating_sub(entry.timestamp);
        if age < self.freshness_millis() {
            tracing::debug!(key, age_ms = age, "cache hit");
            return Some(entry.payload);
        }

        tracing::debug!(key, age_ms = age, "evicting stale cache entry");
        if let Err(err) = self.store.remove(key).await {
            tracing::warn!(key, error = %err, "cache eviction failed");
        }
        None
    }

    /// Stores `payload` under `key` with the current time. Best effort.
    pub async fn set<T: Serialize>(&self, key: &str, payload: &T) {
        if let Err(err) = self.write(key, payload).await {
            tracing::warn!(key, error = %err, "cache write failed");
        }
    }

    async fn write<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), StorageError> {
        let entry = CacheEntry {
            payload,
            timestamp: self.clock.now_millis(),
        };
        let raw = serde_json::to_string(&entry)?;
        self.store.set(key, raw).await
    }

    /// Returns the fresh cached value, or runs `fetch` and caches whatever it
    /// returns (an empty result included).
    pub async fn fetch_with_cache<T, F, Fut>(&self, key: &str, fetch: F) -> T
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if let Some(cached) = self.get(key).await {
            return cached;
        }

        let lock = self.key_lock(key);
        let _guard = lock.lock().await;
        // Another caller may have filled the entry while we waited.
        if let Some(cached) = self.get(key).await {
            return cached;
        }

        tracing::debug!(key, "cache miss");
        let value = fetch().await;
        self.set(key, &value).await;
        value
    }

    /// Like [`fetch_with_cache`](Self::fetch_with_cache) for fallible fetches.
    /// Errors are returned as-is and nothing is cached.
    pub async fn try_fetch_with_cache<T, E, F, Fut>(&self, key: &str, fetch: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get(key).await {
            return Ok(cached);
        }

        let lock = self.key_lock(key);
        let _guard = lock.lock().await;
        if let Some(cached) = self.get(key).await {
            return Ok(cached);
        }

        tracing::debug!(key, "cache miss");
        let value = fetch().await?;
        self.set(key, &value).await;
        Ok(value)
    }

    fn key_lock(&self, key: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn freshness_millis(&self) -> i64 {
        i64::try_from(self.freshness.as_millis()).unwrap_or(i64::MAX)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    use async_trait::async_trait;
    use weather_types::RateSeries;

    /// Simple in-memory store for testing the cache and the service layer.
    #[derive(Default)]
    pub struct MockStore {
        entries: Mutex<HashMap<String, String>>,
    }

    impl MockStore {
        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().unwrap().get(key).cloned()
        }

        pub fn put_raw(&self, key: &str, value: &str) {
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
        }
    }

    #[async_trait]
    impl KeyValueStore for MockStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
            self.entries.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        async fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.entries.lock().unwrap().remove(key);
            Ok(())
        }
    }

    /// Store whose every operation fails, like a full or corrupted medium.
    pub struct FailingStore;

    #[async_trait]
    impl KeyValueStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Backend("disk unreadable".into()))
        }

        async fn set(&self, _key: &str, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("disk unreadable".into()))
        }
    }

    /// Manually advanced clock.
    #[derive(Default)]
    pub struct ManualClock(AtomicI64);

    impl ManualClock {
        pub fn at(millis: i64) -> Arc<Self> {
            Arc::new(Self(AtomicI64::new(millis)))
        }

        pub fn advance(&self, by: Duration) {
            self.0.fetch_add(by.as_millis() as i64, Ordering::SeqCst);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    fn cache_at(clock: Arc<ManualClock>) -> ExpiringCache<MockStore> {
        ExpiringCache::new(MockStore::default()).with_clock(clock)
    }

    #[tokio::test]
    async fn test_set_then_get_returns_value() {
        let cache = cache_at(ManualClock::at(1_000));

        cache.set("rate", &0.92_f64).await;

        assert_eq!(cache.get::<f64>("rate").await, Some(0.92));
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let cache = cache_at(ManualClock::at(0));
        assert_eq!(cache.get::<f64>("rate").await, None);
    }

    #[tokio::test]
    async fn test_entry_expires_at_window_and_stays_evicted() {
        let clock = ManualClock::at(1_000);
        let cache = cache_at(clock.clone());
        cache.set("series", &RateSeries::new(vec![0.9, 0.95])).await;

        clock.advance(Duration::from_millis(599_999));
        assert!(cache.get::<RateSeries>("series").await.is_some());

        clock.advance(Duration::from_millis(1));
        assert!(cache.get::<RateSeries>("series").await.is_none());
        assert!(cache.store().raw("series").is_none());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get::<RateSeries>("series").await.is_none());
    }

    #[tokio::test]
    async fn test_set_overwrites_and_refreshes_timestamp() {
        let clock = ManualClock::at(0);
        let cache = cache_at(clock.clone());
        cache.set("rate", &1.0_f64).await;

        clock.advance(Duration::from_secs(500));
        cache.set("rate", &2.0_f64).await;
        clock.advance(Duration::from_secs(500));

        assert_eq!(cache.get::<f64>("rate").await, Some(2.0));
    }

    #[tokio::test]
    async fn test_entry_document_format() {
        let cache = cache_at(ManualClock::at(42));

        cache.set("rate", &0.5_f64).await;

        let raw: serde_json::Value =
            serde_json::from_str(&cache.store().raw("rate").unwrap()).unwrap();
        assert_eq!(raw, serde_json::json!({"payload": 0.5, "timestamp": 42}));
    }

    #[tokio::test]
    async fn test_corrupt_entry_reads_as_miss() {
        let cache = cache_at(ManualClock::at(0));
        cache.store().put_raw("rate", "{not json");
        cache.store().put_raw("series", r#"{"payload":"text","timestamp":0}"#);

        assert_eq!(cache.get::<f64>("rate").await, None);
        assert_eq!(cache.get::<RateSeries>("series").await, None);
    }

    #[tokio::test]
    async fn test_failing_store_never_errors() {
        let cache = ExpiringCache::new(FailingStore);

        cache.set("rate", &0.92_f64).await;
        assert_eq!(cache.get::<f64>("rate").await, None);

        let value = cache.fetch_with_cache("rate", || async { 0.93_f64 }).await;
        assert_eq!(value, 0.93);
    }

    #[tokio::test]
    async fn test_fetch_with_cache_fetches_once_per_window() {
        let clock = ManualClock::at(0);
        let cache = cache_at(clock.clone());
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let value = cache
                .fetch_with_cache("rate", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    0.92_f64
                })
                .await;
            assert_eq!(value, 0.92);
            clock.advance(Duration::from_secs(60));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        clock.advance(Duration::from_secs(600));
        cache
            .fetch_with_cache("rate", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                0.92_f64
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_fetch_once() {
        let cache = cache_at(ManualClock::at(0));
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            0.92_f64
        };

        let (a, b) = tokio::join!(
            cache.fetch_with_cache("rate", fetch),
            cache.fetch_with_cache("rate", fetch)
        );

        assert_eq!((a, b), (0.92, 0.92));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_fallible_misses_fetch_once() {
        let cache = cache_at(ManualClock::at(0));
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            Ok::<_, &str>(0.92_f64)
        };

        let (a, b) = tokio::join!(
            cache.try_fetch_with_cache("rate", fetch),
            cache.try_fetch_with_cache("rate", fetch)
        );

        assert_eq!((a, b), (Ok(0.92), Ok(0.92)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_different_keys_do_not_wait_on_each_other() {
        let cache = cache_at(ManualClock::at(0));
        let calls = AtomicUsize::new(0);
        let fetch = || async {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            1.0_f64
        };

        tokio::join!(
            cache.fetch_with_cache("current", fetch),
            cache.fetch_with_cache("history", fetch)
        );

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_series_is_cached() {
        let cache = cache_at(ManualClock::at(0));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let series = cache
                .fetch_with_cache("series", || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    RateSeries::empty()
                })
                .await;
            assert!(series.is_empty());
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_try_fetch_does_not_cache_errors() {
        let cache = cache_at(ManualClock::at(0));
        let calls = AtomicUsize::new(0);

        let first: Result<f64, &str> = cache
            .try_fetch_with_cache("rate", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("provider down")
            })
            .await;
        assert_eq!(first, Err("provider down"));
        assert!(cache.store().raw("rate").is_none());

        let second: Result<f64, &str> = cache
            .try_fetch_with_cache("rate", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(0.92)
            })
            .await;
        assert_eq!(second, Ok(0.92));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.get::<f64>("rate").await, Some(0.92));
    }

    #[test]
    fn test_keys_are_distinct_per_pair_and_kind() {
        let keys = [
            current_rate_key(CurrencyPair::JPY_EUR),
            current_rate_key(CurrencyPair::USD_EUR),
            history_key(CurrencyPair::JPY_EUR),
            history_key(CurrencyPair::USD_EUR),
        ];
        assert_eq!(keys[0], "fx-weather:current:JPY:EUR");
        assert_eq!(keys[3], "fx-weather:history:USD:EUR");
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(unique.len(), 4);
    }
}
