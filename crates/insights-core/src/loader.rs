//! Loader — one-time bulk import of the dataset file.
//!
//! The collection is either empty or fully loaded. The file is read and
//! parsed completely before anything is written, so a failed load leaves an
//! empty collection and can simply be retried.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::LoadError;
use crate::store::SharedStore;
use crate::types::{LoadOutcome, Record};

/// Imports the dataset at `path` into `store` if the store is empty.
#[derive(Clone)]
pub struct Loader {
    store: SharedStore,
    path: PathBuf,
}

impl Loader {
    pub fn new(store: SharedStore, path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the dataset unless the collection already holds records.
    ///
    /// Two loaders racing on an empty collection may both insert; callers that
    /// need exclusivity must serialise calls themselves.
    pub async fn load(&self) -> Result<LoadOutcome, LoadError> {
        let existing = self.store.count().await?;
        if existing > 0 {
            tracing::debug!(existing, "collection already populated, skipping load");
            return Ok(LoadOutcome::AlreadyLoaded { existing });
        }

        let records = read_dataset(&self.path).await?;
        if records.is_empty() {
            tracing::warn!(path = %self.path.display(), "dataset is empty, nothing to insert");
            return Ok(LoadOutcome::Loaded { inserted: 0 });
        }

        let inserted = self.store.insert_many(records).await?;
        tracing::info!(inserted, path = %self.path.display(), "dataset loaded");
        Ok(LoadOutcome::Loaded { inserted })
    }
}

/// Read and parse the dataset file into records without touching the store.
pub async fn read_dataset(path: &Path) -> Result<Vec<Record>, LoadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(path, &bytes)
}

fn parse_dataset(path: &Path, bytes: &[u8]) -> Result<Vec<Record>, LoadError> {
    let text = std::str::from_utf8(bytes).map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    // Tolerate a UTF-8 byte order mark.
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let parse_err = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    match serde_json::from_str::<Value>(text).map_err(|e| parse_err(e.to_string()))? {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(parse_err(format!(
                    "element {i} is {}, expected an object",
                    json_kind(&other)
                ))),
            })
            .collect(),
        other => Err(parse_err(format!(
            "top-level value is {}, expected an array",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
