//! Filesystem-backed catalog storage

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::logging::Logger;
use crate::{log_debug, log_warn};

use super::traits::{slug_segments, MetadataSource, StorageBackend, StorageError, StorageResult};

/// File name of a per-directory metadata record
pub const METADATA_FILE: &str = "metadata.json";

/// File name of a snippet body
pub const SNIPPET_FILE: &str = "snippet.md";

/// Storage backend reading a snippet tree from disk
///
/// Expected layout:
///
/// ```text
/// <root>/<vendor>/<language>/metadata.json
/// <root>/<vendor>/<language>/snippet.md
/// ```
///
/// Slugs are paths relative to the root, conventionally `<vendor>/<language>`.
pub struct LocalStorage {
    root: PathBuf,
    logger: Arc<dyn Logger>,
}

impl LocalStorage {
    /// Create a backend rooted at `root`
    ///
    /// The root is not checked here; a missing root surfaces as an I/O
    /// error on the first read.
    pub fn new(root: impl Into<PathBuf>, logger: Arc<dyn Logger>) -> Self {
        Self {
            root: root.into(),
            logger,
        }
    }

    /// The snippet tree root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the snippet body for `slug`, or `None` if the slug would leave the root
    pub fn snippet_path(&self, slug: &str) -> Option<PathBuf> {
        let mut path = self.root.clone();
        path.extend(slug_segments(slug)?);
        Some(path.join(SNIPPET_FILE))
    }

    /// Immediate subdirectories of `dir`, sorted by name
    async fn subdirectories(&self, dir: &Path) -> StorageResult<Vec<PathBuf>> {
        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| StorageError::io(dir, e))?;

        let mut dirs = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io(dir, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| StorageError::io(entry.path(), e))?;
            if file_type.is_dir() {
                dirs.push(entry.path());
            }
        }

        dirs.sort();
        Ok(dirs)
    }
}

impl std::fmt::Debug for LocalStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalStorage")
            .field("root", &self.root)
            .finish()
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    fn name(&self) -> &str {
        "local"
    }

    async fn list_metadata_sources(&self) -> StorageResult<Vec<MetadataSource>> {
        let mut sources = Vec::new();
        for vendor_dir in self.subdirectories(&self.root).await? {
            for language_dir in self.subdirectories(&vendor_dir).await? {
                sources.push(MetadataSource::Directory(language_dir));
            }
        }

        log_debug!(
            self.logger,
            "[LocalStorage] Found {} language directories under {}",
            sources.len(),
            self.root.display()
        );
        Ok(sources)
    }

    async fn read_metadata(&self, source: &MetadataSource) -> StorageResult<Option<Value>> {
        let dir = match source {
            MetadataSource::Directory(dir) => dir,
            MetadataSource::Index(location) => {
                return Err(StorageError::Config(format!(
                    "local storage cannot read index source {}",
                    location
                )));
            }
        };

        let path = dir.join(METADATA_FILE);
        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        match serde_json::from_slice(&data) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                log_warn!(
                    self.logger,
                    "[LocalStorage] Ignoring unparseable {}: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn read_snippet_body(&self, slug: &str) -> StorageResult<String> {
        let path = self
            .snippet_path(slug)
            .ok_or_else(|| StorageError::not_found(slug))?;

        log_debug!(self.logger, "[LocalStorage] Reading snippet: {}", path.display());

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::not_found(slug)),
            Err(e) => return Err(StorageError::io(path, e)),
        };

        String::from_utf8(data).map_err(|_| StorageError::Decode {
            location: path.display().to_string(),
        })
    }
}
