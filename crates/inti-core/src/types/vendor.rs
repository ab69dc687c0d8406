//! Vendor metadata records

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Catalog entry for one (vendor, language) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecord {
    /// Display name of the vendor
    pub vendor_name: String,
    /// Language or ecosystem the snippet targets
    #[serde(default)]
    pub language: String,
    /// Free-text tags in display order
    #[serde(default)]
    pub topics: Vec<String>,
    /// Address of the snippet body, conventionally `<vendor>/<language>`
    pub slug: String,
    /// When the snippet was last touched (informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl VendorRecord {
    /// Create a new record with no topics
    pub fn new(
        vendor_name: impl Into<String>,
        language: impl Into<String>,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            vendor_name: vendor_name.into(),
            language: language.into(),
            topics: vec![],
            slug: slug.into(),
            last_updated: None,
        }
    }

    /// Set the topics
    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Validate an untyped metadata object and convert it
    ///
    /// Requires a non-empty string `vendorName`, a non-empty string `slug`
    /// and an array-valued `topics`. `language` and `lastUpdated` are taken
    /// when they are strings. Non-string topic entries are skipped.
    pub fn from_value(value: &Value) -> Result<Self, RecordRejection> {
        let object = value.as_object().ok_or(RecordRejection::NotAnObject)?;

        let vendor_name = non_empty_str(object.get("vendorName"))
            .ok_or(RecordRejection::MissingField("vendorName"))?;
        let slug = non_empty_str(object.get("slug")).ok_or(RecordRejection::MissingField("slug"))?;
        let topics = object
            .get("topics")
            .and_then(Value::as_array)
            .ok_or(RecordRejection::MissingField("topics"))?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect();

        let language = object
            .get("language")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let last_updated = object
            .get("lastUpdated")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            vendor_name: vendor_name.to_string(),
            language,
            topics,
            slug: slug.to_string(),
            last_updated,
        })
    }

    /// Case-insensitive substring match on the vendor name or any topic
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.vendor_name.to_lowercase().contains(&q)
            || self.topics.iter().any(|t| t.to_lowercase().contains(&q))
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Why a metadata object was not accepted as a `VendorRecord`
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RecordRejection {
    #[error("record is not a JSON object")]
    NotAnObject,

    #[error("record has no valid `{0}`")]
    MissingField(&'static str),
}
