//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod page;
mod server;

pub use handlers::LocaleQuery;
pub use server::HttpServer;
