//! # REST Server Module
//!
//! Exposes the analyzer over HTTP with axum.
//!
//! ## Routes
//!
//! - `POST /api/analyze`: body `{"url": "..."}`, returns the analysis result
//! - `GET /healthz`: liveness check

mod config;
mod handlers;

pub use config::{ServerConfig, ServerConfigBuilder, DEFAULT_BIND};
pub use handlers::{AnalyzeRequest, ApiError};

use crate::error::Result;
use crate::fetcher::PageFetcher;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared state of the REST server
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<PageFetcher>,
}

impl AppState {
    pub fn new(fetcher: PageFetcher) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
        }
    }
}

/// Build the router with the default body limit
pub fn build_router(state: AppState) -> Router {
    build_router_with_config(state, &ServerConfig::default())
}

pub fn build_router_with_config(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/healthz", get(handlers::healthz_handler))
        .route("/api/analyze", post(handlers::analyze_handler))
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .with_state(state)
}

/// Serve the API until Ctrl+C is received
pub async fn serve(config: ServerConfig, fetcher: PageFetcher) -> Result<()> {
    let app = build_router_with_config(AppState::new(fetcher), &config);
    let listener = TcpListener::bind(config.bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
