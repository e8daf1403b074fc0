//! insights-core — records, the document store port, the one-time loader and
//! filter query construction.
//!
//! # Architecture
//!
//! ```text
//! dataset file ──► Loader ──┐
//!                           ├──► DocumentStore (MongoDB / memory)
//! request params ──► Query ─┘
//! ```
//!
//! Both paths share a single long-lived [`store::SharedStore`] handle created
//! at startup.

pub mod config;
pub mod error;
pub mod loader;
pub mod query;
pub mod store;
pub mod types;

pub use error::{ConfigError, LoadError, QueryError, StoreError};
pub use loader::Loader;
pub use query::{FilterField, FilterParams, Query};
pub use store::{DocumentStore, MemoryStore, SharedStore};
pub use types::{LoadOutcome, Record, ID_FIELD};
