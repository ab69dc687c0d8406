//! Catalog error taxonomy

use thiserror::Error;

use crate::storage::StorageError;

/// Coarse classification of a catalog failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    NotFound,
    Unavailable,
    Malformed,
}

/// Errors returned by the catalog service
///
/// An empty catalog is not an error; it is `Ok(vec![])`.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The slug has no snippet behind it
    #[error("no snippet found for `{slug}`")]
    NotFound { slug: String },

    /// The backend could not be reached or read
    #[error("{context} is unavailable: {source}")]
    Unavailable {
        context: String,
        #[source]
        source: StorageError,
    },

    /// Data was read but is unusable
    #[error("{context} is malformed: {reason}")]
    Malformed {
        context: String,
        reason: String,
        #[source]
        source: Option<StorageError>,
    },
}

impl CatalogError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    pub fn malformed(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            context: context.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Classify a raw backend failure, attaching what was being fetched
    pub fn from_storage(context: impl Into<String>, err: StorageError) -> Self {
        match err {
            StorageError::NotFound { slug } => Self::NotFound { slug },
            StorageError::Parse { .. } | StorageError::Decode { .. } => Self::Malformed {
                context: context.into(),
                reason: err.to_string(),
                source: Some(err),
            },
            StorageError::Io { .. }
            | StorageError::Http { .. }
            | StorageError::Network { .. }
            | StorageError::Config(_) => Self::Unavailable {
                context: context.into(),
                source: err,
            },
        }
    }

    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            CatalogError::NotFound { .. } => CatalogErrorKind::NotFound,
            CatalogError::Unavailable { .. } => CatalogErrorKind::Unavailable,
            CatalogError::Malformed { .. } => CatalogErrorKind::Malformed,
        }
    }

    /// HTTP status behind an `Unavailable` error, if there was one
    pub fn http_status(&self) -> Option<u16> {
        match self {
            CatalogError::Unavailable {
                source: StorageError::Http { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_classification() {
        let err = CatalogError::from_storage("snippet for acme/go", StorageError::not_found("acme/go"));
        assert_eq!(err.kind(), CatalogErrorKind::NotFound);
        assert!(err.to_string().contains("acme/go"));

        let err = CatalogError::from_storage(
            "metadata at https://cdn/metadata.json",
            StorageError::http("https://cdn/metadata.json", 404, "Not Found"),
        );
        assert_eq!(err.kind(), CatalogErrorKind::Unavailable);
        assert_eq!(err.http_status(), Some(404));
        assert!(err.to_string().contains("404"));
        assert!(err.source().is_some());

        let err = CatalogError::from_storage(
            "snippet for acme/go",
            StorageError::Decode { location: "x".to_string() },
        );
        assert_eq!(err.kind(), CatalogErrorKind::Malformed);
    }

    #[test]
    fn test_io_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CatalogError::from_storage("vendor catalog", StorageError::io("/snippets", io));
        assert_eq!(err.kind(), CatalogErrorKind::Unavailable);
        assert!(err.to_string().contains("denied"));
        assert_eq!(err.http_status(), None);
    }
}
