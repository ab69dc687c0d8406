//! Builds the vendor list from a storage backend

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;

use crate::logging::Logger;
use crate::storage::{MetadataSource, StorageBackend};
use crate::types::VendorRecord;
use crate::{log_debug, log_error, log_warn};

use super::error::{CatalogError, CatalogResult};

/// Walks every metadata source of a backend and validates what it finds
///
/// - Sources that report no metadata are skipped.
/// - A directory source yields one candidate record; an index source must be
///   a JSON array and yields one candidate per element.
/// - Candidates failing `VendorRecord::from_value` are dropped. If there was
///   at least one candidate and all were dropped, the call fails.
/// - Records keep the backend's order; nothing is sorted or deduplicated.
pub struct MetadataAggregator {
    backend: Arc<dyn StorageBackend>,
    logger: Arc<dyn Logger>,
}

impl MetadataAggregator {
    pub fn new(backend: Arc<dyn StorageBackend>, logger: Arc<dyn Logger>) -> Self {
        Self { backend, logger }
    }

    pub async fn list_vendors(&self) -> CatalogResult<Vec<VendorRecord>> {
        let sources = self.backend.list_metadata_sources().await.map_err(|e| {
            log_error!(
                self.logger,
                "[Aggregator] Cannot enumerate {} backend: {}",
                self.backend.name(),
                e
            );
            CatalogError::from_storage(format!("{} vendor catalog", self.backend.name()), e)
        })?;

        let mut candidates = 0usize;
        let mut records = Vec::new();
        let mut seen_slugs = HashSet::new();

        for source in &sources {
            let value = match self.backend.read_metadata(source).await {
                Ok(Some(value)) => value,
                Ok(None) => {
                    log_debug!(self.logger, "[Aggregator] No metadata in {}", source.location());
                    continue;
                }
                Err(e) => {
                    log_error!(
                        self.logger,
                        "[Aggregator] Failed to read metadata at {}: {}",
                        source.location(),
                        e
                    );
                    return Err(CatalogError::from_storage(
                        format!("metadata at {}", source.location()),
                        e,
                    ));
                }
            };

            for item in Self::candidates(source, value)? {
                candidates += 1;
                match VendorRecord::from_value(&item) {
                    Ok(record) => {
                        if !seen_slugs.insert(record.slug.clone()) {
                            log_warn!(
                                self.logger,
                                "[Aggregator] Duplicate slug `{}` in {}",
                                record.slug,
                                source.location()
                            );
                        }
                        records.push(record);
                    }
                    Err(rejection) => {
                        log_warn!(
                            self.logger,
                            "[Aggregator] Dropping record from {}: {}",
                            source.location(),
                            rejection
                        );
                    }
                }
            }
        }

        if candidates > 0 && records.is_empty() {
            return Err(CatalogError::malformed(
                format!("{} vendor catalog", self.backend.name()),
                format!("no valid records among {} entries", candidates),
            ));
        }

        log_debug!(
            self.logger,
            "[Aggregator] Accepted {} of {} records",
            records.len(),
            candidates
        );
        Ok(records)
    }

    fn candidates(source: &MetadataSource, value: Value) -> CatalogResult<Vec<Value>> {
        match (source, value) {
            (MetadataSource::Directory(_), value) => Ok(vec![value]),
            (MetadataSource::Index(_), Value::Array(items)) => Ok(items),
            (MetadataSource::Index(location), _) => Err(CatalogError::malformed(
                format!("metadata at {}", location),
                "payload must be a JSON array",
            )),
        }
    }
}
