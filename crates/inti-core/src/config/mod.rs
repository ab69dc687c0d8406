//! Catalog configuration
//!
//! - `ConfigFile`: one optional-field layer (YAML file, environment, flags)
//! - `FileConfigSource`: user/workspace YAML locations
//! - `ConfigLoader`: merges layers into an immutable `CatalogConfig`

mod file;
mod settings;

use std::path::PathBuf;

pub use file::{
    ConfigFile, ConfigLevel, FileConfigSource, ENV_BACKEND, ENV_REMOTE_URL, ENV_SNIPPETS_DIR,
};
pub use settings::{default_snippets_dir, BackendConfig, BackendKind, CatalogConfig, ConfigLoader};

/// Errors that can occur while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    #[error("invalid {field}: `{value}`")]
    InvalidValue { field: &'static str, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
