//! Test builders — ergonomic constructors for records, stores and routers.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use insights::{DocumentStore, Loader, MemoryStore, Record};
use serde_json::Value;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Record`] fixtures.
///
/// ```rust
/// let record = RecordBuilder::new()
///     .field("topic", "oil")
///     .field("end_year", 2030)
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}

/// Shorthand for a record with `topic` and `region`.
pub fn topic_region(topic: &str, region: &str) -> Record {
    RecordBuilder::new()
        .field("topic", topic)
        .field("region", region)
        .build()
}

// ---------------------------------------------------------------------------
// Stores and apps
// ---------------------------------------------------------------------------

/// A memory store pre-populated with `records`.
pub async fn seeded_store(records: Vec<Record>) -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());
    store.insert_many(records).await.expect("seed memory store");
    store
}

/// Router over `store` whose loader reads `dataset`.
pub fn app(store: Arc<MemoryStore>, dataset: impl Into<std::path::PathBuf>) -> Router {
    let loader = Loader::new(store.clone(), dataset);
    insights::http::router(insights::http::AppState::new(store, loader))
}

/// Issue `GET uri` against `app` and decode the JSON body.
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).expect("valid request"))
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = serde_json::from_slice(&bytes).expect("body is JSON");
    (status, body)
}
