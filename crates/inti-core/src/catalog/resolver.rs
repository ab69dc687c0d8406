//! Slug to snippet body resolution

use std::sync::Arc;

use crate::log_warn;
use crate::logging::Logger;
use crate::storage::StorageBackend;
use crate::types::SnippetBody;

use super::error::{CatalogError, CatalogResult};

/// Markers that make a snippet unfit to hand to a renderer
///
/// This is a tripwire for a compromised origin, not a sanitizer.
const SCRIPT_MARKERS: &[&str] = &["<script", "javascript:"];

/// First script marker found in `text`, case-insensitively
pub fn find_script_markup(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    SCRIPT_MARKERS
        .iter()
        .copied()
        .find(|marker| lowered.contains(marker))
}

/// Fetches a snippet body and checks it before returning it verbatim
pub struct SnippetResolver {
    backend: Arc<dyn StorageBackend>,
    logger: Arc<dyn Logger>,
}

impl SnippetResolver {
    pub fn new(backend: Arc<dyn StorageBackend>, logger: Arc<dyn Logger>) -> Self {
        Self { backend, logger }
    }

    pub async fn get_snippet(&self, slug: &str) -> CatalogResult<SnippetBody> {
        if slug.trim().is_empty() {
            return Err(CatalogError::malformed("snippet request", "slug must not be empty"));
        }

        let context = format!("snippet for {}", slug);
        let text = self
            .backend
            .read_snippet_body(slug)
            .await
            .map_err(|e| CatalogError::from_storage(context.as_str(), e))?;

        if text.trim().is_empty() {
            return Err(CatalogError::malformed(context, "snippet is empty"));
        }

        if let Some(marker) = find_script_markup(&text) {
            log_warn!(
                self.logger,
                "[Resolver] Refusing snippet `{}` from {} backend: contains `{}`",
                slug,
                self.backend.name(),
                marker
            );
            return Err(CatalogError::malformed(
                context,
                format!("snippet contains script markup (`{}`)", marker),
            ));
        }

        Ok(SnippetBody::new(text))
    }
}
