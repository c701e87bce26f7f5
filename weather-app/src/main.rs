//! # FX Weather Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the cache store adapter
//! - Create the rate client and the forecast service
//! - Start the HTTP server

mod config;

use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use exchange_rates::RatesClient;
use weather_hex::{ExpiringCache, ForecastService, inbound::HttpServer};
use weather_repo::build_store;

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,weather_app=debug,weather_hex=debug".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    init_tracing(config.log_format);

    tracing::info!("Starting FX weather server on port {}", config.port);
    tracing::info!("Using rate provider: {}", config.rates_api_url);

    // Build cache store (in-memory unless a database URL is configured)
    let store = build_store(config.cache_database_url.as_deref()).await?;
    let cache = ExpiringCache::new(store).with_freshness(config.cache_ttl);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(concat!("fx-weather/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let rates = RatesClient::new(&config.rates_api_url)
        .with_http(http)
        .with_history_days(config.history_days);

    // Create the forecast service
    let service = ForecastService::new(rates, cache).with_locale(config.locale);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    Ok(())
}
