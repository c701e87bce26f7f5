//! # Weather Repository
//!
//! Concrete key-value store implementations (adapters) for the rate cache.
//! This crate provides adapters that implement the `KeyValueStore` port.

use async_trait::async_trait;
use weather_types::{KeyValueStore, StorageError};

pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

/// Store selected at startup.
pub enum Store {
    Memory(MemoryStore),
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

/// Build a store from an optional database URL.
///
/// Without a URL the cache lives in memory.
///
/// # Examples
///
/// ```ignore
/// let store = build_store(None).await?;
/// let store = build_store(Some("sqlite://data/cache.db")).await?;
/// ```
pub async fn build_store(database_url: Option<&str>) -> anyhow::Result<Store> {
    match database_url {
        None => {
            tracing::info!("Using in-memory rate cache");
            Ok(Store::Memory(MemoryStore::new()))
        }
        #[cfg(feature = "sqlite")]
        Some(url) if url.starts_with("sqlite:") => {
            tracing::info!("Using SQLite rate cache at {}", url);
            Ok(Store::Sqlite(SqliteStore::new(url).await?))
        }
        Some(url) => anyhow::bail!("Unsupported cache database URL: {}", url),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Implement KeyValueStore for Store (delegation)
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl KeyValueStore for Store {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Store::Memory(inner) => inner.get(key).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        match self {
            Store::Memory(inner) => inner.set(key, value).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.set(key, value).await,
        }
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        match self {
            Store::Memory(inner) => inner.remove(key).await,
            #[cfg(feature = "sqlite")]
            Store::Sqlite(inner) => inner.remove(key).await,
        }
    }
}
