//! Catalog service facade

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::logging::Logger;
use crate::storage::{create_backend, StorageBackend};
use crate::types::{SnippetBody, VendorRecord};
use crate::{log_debug, log_info};

use super::aggregator::MetadataAggregator;
use super::error::CatalogResult;
use super::resolver::SnippetResolver;

/// The two read operations offered to presentation layers
///
/// Holds no state beyond the backend handle; every call re-reads the
/// source, and concurrent calls share nothing mutable.
///
/// # Example
///
/// ```rust,ignore
/// use inti_core::{Catalog, CatalogConfig, NoOpLogger};
/// use std::sync::Arc;
///
/// let catalog = Catalog::from_config(&CatalogConfig::local("./snippets"), Arc::new(NoOpLogger));
/// let vendors = catalog.list_vendors().await?;
/// let body = catalog.get_snippet(&vendors[0].slug).await?;
/// ```
pub struct Catalog {
    backend: Arc<dyn StorageBackend>,
    aggregator: MetadataAggregator,
    resolver: SnippetResolver,
    logger: Arc<dyn Logger>,
}

impl Catalog {
    pub fn new(backend: Arc<dyn StorageBackend>, logger: Arc<dyn Logger>) -> Self {
        Self {
            aggregator: MetadataAggregator::new(Arc::clone(&backend), Arc::clone(&logger)),
            resolver: SnippetResolver::new(Arc::clone(&backend), Arc::clone(&logger)),
            backend,
            logger,
        }
    }

    /// Build a catalog over the backend named in `config`
    pub fn from_config(config: &CatalogConfig, logger: Arc<dyn Logger>) -> Self {
        log_info!(
            logger,
            "[Catalog] Using {} backend at {}",
            config.backend.kind(),
            config.backend.location()
        );
        let backend = create_backend(&config.backend, Arc::clone(&logger));
        Self::new(backend, logger)
    }

    /// The active storage backend
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    /// Every valid vendor record, in backend order
    pub async fn list_vendors(&self) -> CatalogResult<Vec<VendorRecord>> {
        let vendors = self.aggregator.list_vendors().await?;
        log_debug!(self.logger, "[Catalog] Listed {} vendors", vendors.len());
        Ok(vendors)
    }

    /// The markdown body stored for `slug`
    pub async fn get_snippet(&self, slug: &str) -> CatalogResult<SnippetBody> {
        log_debug!(self.logger, "[Catalog] Fetching snippet {}", slug);
        self.resolver.get_snippet(slug).await
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogErrorKind;
    use crate::logging::NoOpLogger;
    use crate::storage::{LocalStorage, MemoryStorage, RemoteStorage};
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ACME_METADATA: &str =
        r#"{"vendorName":"Acme","language":"python","topics":["billing"],"slug":"acme/python"}"#;
    const ACME_SNIPPET: &str = "# Acme\nUse our SDK.";

    fn logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn acme_tree(root: &Path) {
        let dir = root.join("acme/python");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("metadata.json"), ACME_METADATA).unwrap();
        fs::write(dir.join("snippet.md"), ACME_SNIPPET).unwrap();
    }

    #[tokio::test]
    async fn test_local_acme_scenario() {
        let dir = tempdir().unwrap();
        acme_tree(dir.path());

        let catalog = Catalog::from_config(&CatalogConfig::local(dir.path()), logger());
        assert_eq!(catalog.backend().name(), "local");

        let vendors = catalog.list_vendors().await.unwrap();
        assert_eq!(
            vendors,
            vec![VendorRecord::new("Acme", "python", "acme/python").with_topics(["billing"])]
        );

        let snippet = catalog.get_snippet("acme/python").await.unwrap();
        assert_eq!(snippet.as_str(), ACME_SNIPPET);
    }

    #[tokio::test]
    async fn test_remote_metadata_404_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metadata.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let catalog = Catalog::from_config(&CatalogConfig::remote(server.uri()), logger());
        let err = catalog.list_vendors().await.unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::Unavailable);
        assert_eq!(err.http_status(), Some(404));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_remote_empty_array_is_empty_catalog() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metadata.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let catalog = Catalog::from_config(&CatalogConfig::remote(server.uri()), logger());
        assert!(catalog.list_vendors().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_malformed_json_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metadata.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[{\"vendorName\":"))
            .mount(&server)
            .await;

        let catalog = Catalog::from_config(&CatalogConfig::remote(server.uri()), logger());
        let err = catalog.list_vendors().await.unwrap_err();
        assert_eq!(err.kind(), CatalogErrorKind::Malformed);
    }

    #[tokio::test]
    async fn test_remote_partial_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/metadata.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"vendorName": "Acme", "slug": "acme/python", "topics": []},
                {"vendorName": "Broken", "topics": []},
                {"vendorName": "Twilio", "slug": "twilio/go", "topics": ["sms"]}
            ])))
            .mount(&server)
            .await;

        let catalog = Catalog::from_config(&CatalogConfig::remote(server.uri()), logger());
        assert_eq!(catalog.list_vendors().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_backends_are_substitutable() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("snippets");
        acme_tree(&root);
        fs::create_dir_all(dir.path().join("secret")).unwrap();
        fs::write(dir.path().join("secret/snippet.md"), "# outside root").unwrap();

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/snippets/metadata.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!("[{}]", ACME_METADATA)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/snippets/acme/python/snippet.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ACME_SNIPPET))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/secret/snippet.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("# outside origin"))
            .mount(&server)
            .await;

        let memory = MemoryStorage::new();
        memory.insert(serde_json::from_str(ACME_METADATA).unwrap(), ACME_SNIPPET);

        let origin = format!("{}/snippets", server.uri());
        let catalogs = [
            Catalog::new(Arc::new(LocalStorage::new(&root, logger())), logger()),
            Catalog::new(Arc::new(RemoteStorage::new(&origin, logger())), logger()),
            Catalog::new(Arc::new(memory), logger()),
        ];

        let expected = catalogs[0].list_vendors().await.unwrap();
        for catalog in &catalogs {
            assert_eq!(catalog.list_vendors().await.unwrap(), expected, "{:?}", catalog);
            assert_eq!(
                catalog.get_snippet("acme/python").await.unwrap().as_str(),
                ACME_SNIPPET
            );

            for slug in ["ghost/lang", "../secret", "acme/python?raw=1"] {
                let err = catalog.get_snippet(slug).await.unwrap_err();
                assert_eq!(err.kind(), CatalogErrorKind::NotFound, "{} on {:?}", slug, catalog);
                assert!(err.to_string().contains(slug));
            }
        }
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_independent() {
        let store = MemoryStorage::new();
        for i in 0..8 {
            store.insert(
                json!({"vendorName": format!("V{}", i), "slug": format!("v{}/rust", i), "topics": []}),
                format!("# V{}", i),
            );
        }
        let catalog = Arc::new(Catalog::new(Arc::new(store), logger()));

        let fetches = (0..8).map(|i| {
            let catalog = Arc::clone(&catalog);
            async move {
                let slug = format!("v{}/rust", i);
                let body = catalog.get_snippet(&slug).await;
                body
            }
        });
        let results = futures::future::join_all(fetches).await;

        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap().as_str(), format!("# V{}", i));
        }
    }
}
