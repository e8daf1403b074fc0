//! insights HTTP surface — axum router over the loader and the store.
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /load_data` | [`handlers::load_data`] |
//! | `GET /api/data` | [`handlers::get_data`] |
//! | `GET /health` | [`handlers::health`] |
//!
//! Every route allows any origin.

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use insights_core::{Loader, SharedStore};
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// State shared by every handler. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub loader: Loader,
}

impl AppState {
    pub fn new(store: SharedStore, loader: Loader) -> Self {
        Self { store, loader }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/load_data", get(handlers::load_data))
        .route("/api/data", get(handlers::get_data))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve on `addr` until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "insights listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
