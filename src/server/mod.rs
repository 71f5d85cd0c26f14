//! HTTP API exposing the bulletin resolver, download proxy and scanner.

mod error;
mod routes;

pub use routes::{DownloadParams, ScanRequest};

use crate::config::ResolvedConfig;
use crate::downloader::{HttpFetcher, PageFetcher};
use crate::errors::{AppError, AppResult};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared application state
///
/// Request handlers only read from it; every request performs its own fetch.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    pub config: Arc<ResolvedConfig>,
}

impl AppState {
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: ResolvedConfig) -> Self {
        Self {
            fetcher,
            config: Arc::new(config),
        }
    }

    /// State backed by a real HTTP client built from `config`.
    pub fn from_config(config: ResolvedConfig) -> AppResult<Self> {
        let fetcher = HttpFetcher::from_config(&config)?;
        Ok(Self::new(Arc::new(fetcher), config))
    }
}

/// Build the Axum application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/boletin", get(routes::latest_bulletin_handler))
        .route("/boletin/download", get(routes::download_handler))
        .route("/boletin/scan", post(routes::scan_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `bind_addr` and serves the API until Ctrl-C.
pub async fn serve(state: AppState, bind_addr: &str) -> AppResult<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::IoError(format!("Failed to bind {bind_addr}: {e}")))?;

    info!(addr = bind_addr, "Server listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::IoError(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
