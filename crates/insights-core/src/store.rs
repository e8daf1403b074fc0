//! Store — the document store port and its in-process implementation.
//!
//! The store is the single source of truth. Both the loader and the read
//! endpoint hold the same `Arc<dyn DocumentStore>` handle; nothing else keeps
//! records in memory.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::query::Query;
use crate::types::{Record, ID_FIELD};

/// A schema-flexible collection reached through a driver.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Number of records in the collection.
    async fn count(&self) -> Result<u64, StoreError>;

    /// Insert every record in one bulk operation. The store assigns
    /// [`ID_FIELD`] to each record. Returns the number inserted.
    async fn insert_many(&self, records: Vec<Record>) -> Result<u64, StoreError>;

    /// Records matching every clause of `query`, in the store's natural
    /// order, with [`ID_FIELD`] removed.
    async fn find(&self, query: &Query) -> Result<Vec<Record>, StoreError>;
}

/// Shared handle passed to the loader and the HTTP layer.
pub type SharedStore = Arc<dyn DocumentStore>;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process [`DocumentStore`]. Keeps records in insertion order, which is
/// also the order `find` returns them in.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }

    /// Every stored record including its identifier.
    pub async fn raw_records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    // ObjectId-shaped: 24 hex digits.
    fn assign_id(&self) -> String {
        format!("{:024x}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn insert_many(&self, records: Vec<Record>) -> Result<u64, StoreError> {
        let inserted = records.len() as u64;
        let mut stored = self.records.write().await;
        stored.reserve(records.len());
        for mut record in records {
            record
                .entry(ID_FIELD)
                .or_insert_with(|| Value::String(self.assign_id()));
            stored.push(record);
        }
        Ok(inserted)
    }

    async fn find(&self, query: &Query) -> Result<Vec<Record>, StoreError> {
        let stored = self.records.read().await;
        Ok(stored
            .iter()
            .filter(|record| query.matches(record))
            .map(|record| {
                let mut out = record.clone();
                out.remove(ID_FIELD);
                out
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
