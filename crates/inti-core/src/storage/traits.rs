//! Core traits and types for catalog storage

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Where a batch of metadata lives inside a backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataSource {
    /// A `<vendor>/<language>` directory holding one `metadata.json` record
    Directory(PathBuf),
    /// A single document holding the aggregated array of records
    Index(String),
}

impl MetadataSource {
    /// Human-readable location, used as error context
    pub fn location(&self) -> String {
        match self {
            MetadataSource::Directory(dir) => dir.display().to_string(),
            MetadataSource::Index(location) => location.clone(),
        }
    }
}

/// Raw failures reported by storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no snippet stored for slug `{slug}`")]
    NotFound { slug: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("GET {url} returned HTTP {status} {reason}")]
    Http {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("invalid JSON at {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("content at {location} is not valid UTF-8")]
    Decode { location: String },

    #[error("storage configuration error: {0}")]
    Config(String),
}

impl StorageError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn http(url: impl Into<String>, status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            reason: reason.into(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Path segments of `slug`, or `None` if the slug could address anything
/// outside the catalog root
///
/// Rejects `..`, absolute paths, and characters a URL would treat as
/// structure (`?`, `#`, `\`, `%`). `.` segments are dropped. Both the
/// filesystem and the HTTP backends resolve slugs through this, so they
/// agree on which slugs exist.
pub fn slug_segments(slug: &str) -> Option<Vec<&str>> {
    if slug.contains(|c: char| matches!(c, '?' | '#' | '\\' | '%')) {
        return None;
    }

    let mut segments = Vec::new();
    for component in Path::new(slug).components() {
        match component {
            Component::Normal(segment) => segments.push(segment.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments)
    }
}

/// Capability set every catalog storage backend provides
///
/// Implementations:
/// - `LocalStorage`: a `<root>/<vendor>/<language>/` directory tree
/// - `RemoteStorage`: a static-file HTTP origin
/// - `MemoryStorage`: in-memory catalog for tests and embedding
///
/// Backends are stateless between calls; every read goes to the source.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short name of this backend kind (e.g. "local", "remote")
    fn name(&self) -> &str;

    /// Enumerate the places metadata can be read from, in a deterministic order
    async fn list_metadata_sources(&self) -> StorageResult<Vec<MetadataSource>>;

    /// Read and parse the metadata at `source`
    ///
    /// `Ok(None)` means "no metadata here" and is not an error.
    async fn read_metadata(&self, source: &MetadataSource) -> StorageResult<Option<Value>>;

    /// Read the raw markdown body for `slug`
    ///
    /// Must return `StorageError::NotFound` when the slug has no snippet.
    async fn read_snippet_body(&self, slug: &str) -> StorageResult<String>;
}
