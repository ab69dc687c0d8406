//! HTTP-origin catalog storage

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::logging::Logger;
use crate::log_debug;

use super::local_store::{METADATA_FILE, SNIPPET_FILE};
use super::traits::{slug_segments, MetadataSource, StorageBackend, StorageError, StorageResult};

/// Default centrally hosted snippet repository
pub const DEFAULT_ORIGIN: &str = "https://raw.githubusercontent.com/neilthomass/Inte/main/snippets";

/// Storage backend reading a published catalog from a static-file origin
///
/// The origin serves one aggregated `metadata.json` array and one
/// `<slug>/snippet.md` per entry.
pub struct RemoteStorage {
    origin: String,
    client: Client,
    logger: Arc<dyn Logger>,
}

impl RemoteStorage {
    /// Create a backend for `origin` with a default HTTP client
    pub fn new(origin: impl AsRef<str>, logger: Arc<dyn Logger>) -> Self {
        Self {
            origin: origin.as_ref().trim_end_matches('/').to_string(),
            client: Client::new(),
            logger,
        }
    }

    /// Origin URL without a trailing slash
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// URL of the aggregated metadata document
    pub fn metadata_url(&self) -> String {
        format!("{}/{}", self.origin, METADATA_FILE)
    }

    /// URL of the snippet body for `slug`, or `None` if the slug would leave the origin
    pub fn snippet_url(&self, slug: &str) -> Option<String> {
        let segments = slug_segments(slug)?;
        Some(format!("{}/{}/{}", self.origin, segments.join("/"), SNIPPET_FILE))
    }

    async fn get(&self, url: &str) -> StorageResult<(StatusCode, Vec<u8>)> {
        log_debug!(self.logger, "[RemoteStorage] GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| StorageError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| StorageError::Network {
                url: url.to_string(),
                source,
            })?;

        Ok((status, body.to_vec()))
    }
}

fn http_error(url: &str, status: StatusCode) -> StorageError {
    StorageError::http(url, status.as_u16(), status.canonical_reason().unwrap_or("Unknown"))
}

impl std::fmt::Debug for RemoteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStorage")
            .field("origin", &self.origin)
            .finish()
    }
}

#[async_trait]
impl StorageBackend for RemoteStorage {
    fn name(&self) -> &str {
        "remote"
    }

    async fn list_metadata_sources(&self) -> StorageResult<Vec<MetadataSource>> {
        Ok(vec![MetadataSource::Index(self.metadata_url())])
    }

    async fn read_metadata(&self, source: &MetadataSource) -> StorageResult<Option<Value>> {
        let url = match source {
            MetadataSource::Index(url) => url,
            MetadataSource::Directory(dir) => {
                return Err(StorageError::Config(format!(
                    "remote storage cannot read directory source {}",
                    dir.display()
                )));
            }
        };

        let (status, body) = self.get(url).await?;
        if !status.is_success() {
            return Err(http_error(url, status));
        }

        let value = serde_json::from_slice(&body).map_err(|source| StorageError::Parse {
            location: url.clone(),
            source,
        })?;
        Ok(Some(value))
    }

    async fn read_snippet_body(&self, slug: &str) -> StorageResult<String> {
        let url = self
            .snippet_url(slug)
            .ok_or_else(|| StorageError::not_found(slug))?;
        let (status, body) = self.get(&url).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(StorageError::not_found(slug));
        }
        if !status.is_success() {
            return Err(http_error(&url, status));
        }

        String::from_utf8(body).map_err(|_| StorageError::Decode { location: url })
    }
}
