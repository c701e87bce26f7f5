//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::{DEFAULT_BASE_URL, DEFAULT_HISTORY_DAYS};
use weather_hex::cache::DEFAULT_FRESHNESS;
use weather_types::Locale;

/// Longest accepted historical window, in days.
pub const MAX_HISTORY_DAYS: i64 = 366;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rates_api_url: String,
    pub cache_database_url: Option<String>,
    pub cache_ttl: Duration,
    pub history_days: i64,
    pub locale: Locale,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid PORT: {}", e))?;

        let rates_api_url = lookup("RATES_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let cache_database_url = lookup("CACHE_DATABASE_URL").filter(|url| !url.trim().is_empty());

        let cache_ttl = match lookup("CACHE_TTL_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .map_err(|e| anyhow::anyhow!("Invalid CACHE_TTL_SECS: {}", e))?,
            ),
            None => DEFAULT_FRESHNESS,
        };

        let history_days = match lookup("HISTORY_DAYS") {
            Some(days) => days
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid HISTORY_DAYS: {}", e))?,
            None => DEFAULT_HISTORY_DAYS,
        };
        if !(1..=MAX_HISTORY_DAYS).contains(&history_days) {
            anyhow::bail!(
                "HISTORY_DAYS must be between 1 and {}, got {}",
                MAX_HISTORY_DAYS,
                history_days
            );
        }

        let locale = match lookup("WEATHER_LOCALE") {
            Some(locale) => locale.parse().map_err(|e: String| anyhow::anyhow!(e))?,
            None => Locale::default(),
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("Invalid LOG_FORMAT: {} (expected pretty or json)", other),
        };

        Ok(Self {
            port,
            rates_api_url,
            cache_database_url,
            cache_ttl,
            history_days,
            locale,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rates_api_url, DEFAULT_BASE_URL);
        assert!(config.cache_database_url.is_none());
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.history_days, 30);
        assert_eq!(config.locale, Locale::Ja);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "8080"),
            ("RATES_API_URL", "http://localhost:9000"),
            ("CACHE_DATABASE_URL", "sqlite://data/cache.db"),
            ("CACHE_TTL_SECS", "60"),
            ("HISTORY_DAYS", "14"),
            ("WEATHER_LOCALE", "en"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rates_api_url, "http://localhost:9000");
        assert_eq!(config.cache_database_url.as_deref(), Some("sqlite://data/cache.db"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.history_days, 14);
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_blank_database_url_means_memory() {
        let config = load(&[("CACHE_DATABASE_URL", "  ")]).unwrap();
        assert!(config.cache_database_url.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("PORT", "http")]).is_err());
        assert!(load(&[("CACHE_TTL_SECS", "-1")]).is_err());
        assert!(load(&[("HISTORY_DAYS", "0")]).is_err());
        assert!(load(&[("HISTORY_DAYS", "-30")]).is_err());
        assert!(load(&[("WEATHER_LOCALE", "fr")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
    }

    #[test]
    fn test_history_days_bounds() {
        assert_eq!(load(&[("HISTORY_DAYS", "1")]).unwrap().history_days, 1);
        assert_eq!(load(&[("HISTORY_DAYS", "366")]).unwrap().history_days, 366);
        assert!(load(&[("HISTORY_DAYS", "367")]).is_err());
        assert!(load(&[("HISTORY_DAYS", "200000000000000")]).is_err());
    }
}
