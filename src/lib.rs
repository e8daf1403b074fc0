//! insights — loads a fixed JSON dataset into a document store once and
//! serves equality-filtered reads over HTTP.
//!
//! This crate re-exports the workspace members so that integration tests
//! and benches can import them from one place.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──► Loader ──┐
//! HTTP (axum) ────┤             ├──► DocumentStore ──► MongoDB | memory
//!                 └──► Query ───┘
//! ```

pub use insights_http as http;
pub use insights_mongo as mongo;

pub use insights_core::config::{Backend, Config};
pub use insights_core::{
    DocumentStore, FilterField, FilterParams, LoadError, LoadOutcome, Loader, MemoryStore, Query,
    QueryError, Record, SharedStore, StoreError, ID_FIELD,
};

/// Open the store selected by `config.store.backend`.
pub async fn open_store(config: &Config) -> anyhow::Result<SharedStore> {
    use anyhow::Context;

    let store: SharedStore = match config.store.backend {
        Backend::Memory => MemoryStore::shared(),
        Backend::Mongo => std::sync::Arc::new(
            insights_mongo::MongoStore::connect(&config.store)
                .await
                .context("failed to connect to the document store")?,
        ),
    };
    tracing::info!(backend = %config.store.backend, "document store ready");
    Ok(store)
}
