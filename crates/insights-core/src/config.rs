//! Configuration types for insights.
//!
//! [`Config::load`] layers, lowest precedence first: the embedded defaults,
//! a TOML file, `INSIGHTS__*` environment variables and finally `MONGO_URI`.
//! An explicitly named file must exist; the default `insights.toml` in the
//! working directory is optional. [`Config::defaults`] returns the embedded
//! defaults without touching the filesystem or the environment (useful in
//! tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 5000

[store]
backend    = "mongo"
database   = "insights"
collection = "insights"

[dataset]
path = "../data/jsondata.json"
"#;

/// Config file read when none is named explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "insights.toml";

/// Environment prefix for layered overrides, e.g. `INSIGHTS__SERVER__PORT`.
const ENV_PREFIX: &str = "INSIGHTS";
const ENV_SEPARATOR: &str = "__";

/// Connection string variable honoured for compatibility with existing
/// deployments.
pub const MONGO_URI_VAR: &str = "MONGO_URI";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which [`DocumentStore`](crate::store::DocumentStore) implementation to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Mongo,
    Memory,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Mongo => write!(f, "mongo"),
            Backend::Memory => write!(f, "memory"),
        }
    }
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,
    /// Connection string. Required for the `mongo` backend.
    #[serde(default)]
    pub uri: Option<String>,
    /// Used when the connection string does not name a database.
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_backend() -> Backend { Backend::Mongo }
fn default_database() -> String { "insights".to_string() }
fn default_collection() -> String { "insights".to_string() }

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            uri: None,
            database: default_database(),
            collection: default_collection(),
        }
    }
}

impl StoreConfig {
    /// The connection string, or [`ConfigError::MissingUri`] when the mongo
    /// backend is selected without one.
    pub fn require_uri(&self) -> Result<&str, ConfigError> {
        match self.uri.as_deref() {
            Some(uri) if !uri.trim().is_empty() => Ok(uri),
            _ => Err(ConfigError::MissingUri),
        }
    }
}

/// `[dataset]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,
}

fn default_dataset_path() -> PathBuf { PathBuf::from("../data/jsondata.json") }

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path` and the process environment, layered on top of the
    /// built-in defaults. `Some(path)` must exist; `None` reads
    /// [`DEFAULT_CONFIG_FILE`] if it is present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, std::env::vars().collect())
    }

    /// Same as [`Config::load`] but reads variables from `vars` instead of the
    /// process environment.
    pub fn load_with_env(
        path: Option<&Path>,
        vars: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let mongo_uri = vars.get(MONGO_URI_VAR).cloned();

        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };
        builder = builder.add_source(file);

        let cfg: Config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .set_override_option("store.uri", mongo_uri)?
            .build()?
            .try_deserialize()?;

        if cfg.store.backend == Backend::Mongo {
            cfg.store.require_uri()?;
        }
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
