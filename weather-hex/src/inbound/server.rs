//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use weather_types::{KeyValueStore, RateSource};

use super::handlers::{self, AppState};
use crate::ForecastService;

/// HTTP Server for the forecast page and API.
pub struct HttpServer<R: RateSource, S: KeyValueStore> {
    state: Arc<AppState<R, S>>,
}

impl<R: RateSource + 'static, S: KeyValueStore> HttpServer<R, S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: ForecastService<R, S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(handlers::forecast_page::<R, S>))
            .route("/health", get(handlers::health))
            .route("/api/forecast", get(handlers::forecast::<R, S>))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
