//! insights-mongo — MongoDB backend for the [`DocumentStore`] port.
//!
//! Records travel as JSON objects through the core and are converted to and
//! from BSON at this boundary only. The integer clause of a [`Query`] becomes
//! an `$in` over the integer and its decimal string so that datasets storing
//! years as text still match.

use async_trait::async_trait;
use futures::TryStreamExt;
use insights_core::config::StoreConfig;
use insights_core::query::{Clause, Expected};
use insights_core::{DocumentStore, Query, Record, StoreError, ID_FIELD};
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};

/// A MongoDB collection behind the [`DocumentStore`] trait.
#[derive(Clone)]
pub struct MongoStore {
    collection: Collection<Document>,
}

impl MongoStore {
    /// Connect using `config.uri`. The database named in the URI wins over
    /// `config.database`.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let uri = config
            .require_uri()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let client = Client::with_uri_str(uri).await.map_err(unavailable)?;
        let database = client
            .default_database()
            .unwrap_or_else(|| client.database(&config.database));
        tracing::info!(
            database = %database.name(),
            collection = %config.collection,
            "connected to document store"
        );
        Ok(Self {
            collection: database.collection(&config.collection),
        })
    }

    pub fn from_collection(collection: Collection<Document>) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn count(&self) -> Result<u64, StoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(backend)
    }

    async fn insert_many(&self, records: Vec<Record>) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        let docs = records
            .into_iter()
            .map(record_to_document)
            .collect::<Result<Vec<_>, _>>()?;
        let result = self.collection.insert_many(docs).await.map_err(backend)?;
        Ok(result.inserted_ids.len() as u64)
    }

    async fn find(&self, query: &Query) -> Result<Vec<Record>, StoreError> {
        let cursor = self
            .collection
            .find(query_filter(query))
            .projection(doc! { ID_FIELD: 0 })
            .await
            .map_err(backend)?;
        let docs: Vec<Document> = cursor.try_collect().await.map_err(backend)?;
        docs.into_iter().map(document_to_record).collect()
    }
}

// ---------------------------------------------------------------------------
// Query → filter document
// ---------------------------------------------------------------------------

/// Build the filter document for `query`. An empty query yields `{}`.
pub fn query_filter(query: &Query) -> Document {
    query
        .clauses()
        .iter()
        .map(|clause| (clause.field.to_string(), clause_value(clause)))
        .collect()
}

fn clause_value(clause: &Clause) -> Bson {
    match &clause.expected {
        Expected::Text(text) => Bson::String(text.clone()),
        Expected::Integer(n) => Bson::Document(doc! {
            "$in": [Bson::Int64(*n), n.to_string()]
        }),
    }
}

// ---------------------------------------------------------------------------
// JSON <-> BSON
// ---------------------------------------------------------------------------

fn record_to_document(record: Record) -> Result<Document, StoreError> {
    let value = serde_json::Value::Object(record);
    match Bson::try_from(value) {
        Ok(Bson::Document(doc)) => Ok(doc),
        Ok(other) => Err(StoreError::Conversion(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))),
        Err(e) => Err(StoreError::Conversion(e.to_string())),
    }
}

fn document_to_record(mut doc: Document) -> Result<Record, StoreError> {
    doc.remove(ID_FIELD);
    match Bson::Document(doc).into_relaxed_extjson() {
        serde_json::Value::Object(record) => Ok(record),
        other => Err(StoreError::Conversion(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn unavailable(e: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn backend(e: mongodb::error::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
