//! Core types for insights-core.
//!
//! Records are schema-flexible: the dataset is a list of flat JSON objects
//! and only a handful of their keys are ever inspected by the query layer.

/// One dataset entry as stored and returned.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Key under which the store keeps its own identifier. Never returned to
/// clients.
pub const ID_FIELD: &str = "_id";

/// Result of a [`Loader::load`](crate::loader::Loader::load) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection already held `existing` records; nothing was written.
    AlreadyLoaded { existing: u64 },
    /// The collection was empty and `inserted` records were bulk-inserted.
    Loaded { inserted: u64 },
}

impl LoadOutcome {
    /// Client-facing status message.
    pub fn message(&self) -> &'static str {
        match self {
            LoadOutcome::AlreadyLoaded { .. } => "Data already loaded",
            LoadOutcome::Loaded { .. } => "Data loaded successfully",
        }
    }
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::AlreadyLoaded { existing } => {
                write!(f, "already loaded ({existing} records present)")
            }
            LoadOutcome::Loaded { inserted } => write!(f, "loaded {inserted} records"),
        }
    }
}
