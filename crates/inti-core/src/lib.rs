//! Inti Core
//!
//! Catalog and retrieval layer for vendor integration snippets: short
//! markdown documents keyed by a `<vendor>/<language>` slug.
//!
//! The catalog reads from one of two interchangeable storage backends
//! (a local snippet tree or a static HTTP origin) and offers exactly two
//! operations, `list_vendors` and `get_snippet`. The `tools` and `mcp`
//! modules put those operations behind the MCP tool protocol.
//!
//! ```rust,ignore
//! use inti_core::{Catalog, ConfigLoader, TracingLogger};
//! use std::sync::Arc;
//!
//! let config = ConfigLoader::new().load(Default::default())?;
//! let catalog = Catalog::from_config(&config, Arc::new(TracingLogger::new()));
//!
//! for vendor in catalog.list_vendors().await? {
//!     println!("{} ({})", vendor.vendor_name, vendor.slug);
//! }
//! let markdown = catalog.get_snippet("acme/python").await?;
//! ```

pub mod types;
pub mod logging;
pub mod config;
pub mod storage;
pub mod catalog;
pub mod tools;
pub mod mcp;

// Re-export commonly used types
pub use types::{VendorRecord, SnippetBody, RecordRejection};

pub use logging::{Logger, NoOpLogger, TracingLogger};

pub use config::{
    BackendConfig, BackendKind, CatalogConfig, ConfigError, ConfigFile, ConfigLoader, ConfigResult,
};

pub use storage::{
    StorageBackend, StorageError, StorageResult, MetadataSource,
    LocalStorage, RemoteStorage, MemoryStorage,
    create_backend, supported_backends,
};

pub use catalog::{Catalog, CatalogError, CatalogErrorKind, CatalogResult};

pub use tools::{filter_vendors, CatalogTools, ToolOutput};

pub use mcp::{CatalogServer, McpError, McpResult};
