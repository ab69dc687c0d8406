//! Catalog resolution and retrieval
//!
//! ```text
//! presentation layer
//!        │  list_vendors / get_snippet
//!        ▼
//! Catalog ──► MetadataAggregator ──┐
//!        └──► SnippetResolver ─────┤
//!                                  ▼
//!                         Arc<dyn StorageBackend>
//! ```

mod error;
mod aggregator;
mod resolver;
mod service;

pub use error::{CatalogError, CatalogErrorKind, CatalogResult};
pub use aggregator::MetadataAggregator;
pub use resolver::{find_script_markup, SnippetResolver};
pub use service::Catalog;
