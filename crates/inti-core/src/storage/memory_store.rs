//! In-memory catalog storage

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use super::traits::{slug_segments, MetadataSource, StorageBackend, StorageError, StorageResult};

const MEMORY_INDEX: &str = "memory://metadata.json";

/// In-memory storage for testing and embedding
///
/// Behaves like an HTTP origin: one aggregated index document plus a
/// body per slug. Records are kept as raw JSON so malformed entries can
/// be exercised the same way a remote payload would.
///
/// # Example
///
/// ```
/// use inti_core::storage::MemoryStorage;
/// use serde_json::json;
///
/// let store = MemoryStorage::new();
/// store.insert(
///     json!({"vendorName": "Acme", "slug": "acme/python", "topics": []}),
///     "# Acme",
/// );
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryStorage {
    index: RwLock<Option<Value>>,
    bodies: RwLock<HashMap<String, String>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create an empty store; the index reads as `[]`
    pub fn new() -> Self {
        Self {
            index: RwLock::new(Some(Value::Array(vec![]))),
            bodies: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store with a raw index document and bodies
    pub fn with_index(index: Value, bodies: HashMap<String, String>) -> Self {
        Self {
            index: RwLock::new(Some(index)),
            bodies: RwLock::new(bodies),
        }
    }

    /// Append a metadata record and its body
    ///
    /// The body is keyed by the record's `slug` field when it has one.
    pub fn insert(&self, record: Value, body: impl Into<String>) {
        if let Some(slug) = record.get("slug").and_then(Value::as_str) {
            self.bodies.write().insert(slug.to_string(), body.into());
        }

        let mut index = self.index.write();
        match index.as_mut() {
            Some(Value::Array(items)) => items.push(record),
            _ => *index = Some(Value::Array(vec![record])),
        }
    }

    /// Store a body without touching the index
    pub fn insert_body(&self, slug: impl Into<String>, body: impl Into<String>) {
        self.bodies.write().insert(slug.into(), body.into());
    }

    /// Replace the index document with arbitrary JSON, or remove it
    pub fn set_index(&self, index: Option<Value>) {
        *self.index.write() = index;
    }

    /// Number of stored bodies
    pub fn len(&self) -> usize {
        self.bodies.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_metadata_sources(&self) -> StorageResult<Vec<MetadataSource>> {
        Ok(vec![MetadataSource::Index(MEMORY_INDEX.to_string())])
    }

    async fn read_metadata(&self, _source: &MetadataSource) -> StorageResult<Option<Value>> {
        Ok(self.index.read().clone())
    }

    async fn read_snippet_body(&self, slug: &str) -> StorageResult<String> {
        let key = slug_segments(slug)
            .map(|segments| segments.join("/"))
            .ok_or_else(|| StorageError::not_found(slug))?;

        self.bodies
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(slug))
    }
}
