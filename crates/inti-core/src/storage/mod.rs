//! Catalog storage backends
//!
//! This module provides the "where bytes live" abstraction:
//! - `StorageBackend` trait with the `{list_metadata_sources, read_metadata, read_snippet_body}` capability set
//! - Built-in implementations: `LocalStorage`, `RemoteStorage`, `MemoryStorage`
//! - `create_backend` to build the configured variant at startup

mod traits;
mod local_store;
mod remote_store;
mod memory_store;

use std::sync::Arc;

pub use traits::{slug_segments, MetadataSource, StorageBackend, StorageError, StorageResult};
pub use local_store::{LocalStorage, METADATA_FILE, SNIPPET_FILE};
pub use remote_store::{RemoteStorage, DEFAULT_ORIGIN};
pub use memory_store::MemoryStorage;

use crate::config::BackendConfig;
use crate::logging::Logger;

/// Create the storage backend described by `config`
pub fn create_backend(config: &BackendConfig, logger: Arc<dyn Logger>) -> Arc<dyn StorageBackend> {
    match config {
        BackendConfig::Local { root } => Arc::new(LocalStorage::new(root.clone(), logger)),
        BackendConfig::Remote { origin } => Arc::new(RemoteStorage::new(origin, logger)),
    }
}

/// Backend kinds selectable through configuration, with descriptions
pub fn supported_backends() -> Vec<(&'static str, &'static str)> {
    vec![
        ("local", "Snippet tree on the local filesystem (<root>/<vendor>/<language>/)"),
        ("remote", "Static-file HTTP origin serving metadata.json and <slug>/snippet.md"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;

    #[test]
    fn test_create_backend() {
        let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());

        let local = create_backend(&BackendConfig::Local { root: "/tmp/snippets".into() }, logger.clone());
        assert_eq!(local.name(), "local");

        let remote = create_backend(
            &BackendConfig::Remote { origin: DEFAULT_ORIGIN.to_string() },
            logger,
        );
        assert_eq!(remote.name(), "remote");
    }

    #[test]
    fn test_supported_backends() {
        let names: Vec<_> = supported_backends().into_iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["local", "remote"]);
    }
}
