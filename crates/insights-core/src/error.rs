//! Error taxonomy shared by every layer.
//!
//! Configuration and store failures are fatal to the operation that hit
//! them. [`LoadError::Decode`] is the one recovered case: the loader reports
//! it and leaves the collection untouched. [`QueryError`] is always the
//! caller's fault.

use std::path::PathBuf;

/// Failures reported by a [`DocumentStore`](crate::store::DocumentStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document store rejected operation: {0}")]
    Backend(String),
    #[error("stored document could not be converted: {0}")]
    Conversion(String),
}

/// Failures while bulk-loading the dataset file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {path} is not valid UTF-8: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("dataset {path} is not a JSON array of objects: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while turning request parameters into a [`Query`](crate::query::Query).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid end_year {value:?}: expected an integer")]
    InvalidEndYear { value: String },
}

/// Failures while assembling [`Config`](crate::config::Config).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
    #[error("store.backend is \"mongo\" but no connection string was given (set MONGO_URI)")]
    MissingUri,
}
