//! Storage module for persisting crawl session state
//!
//! The session controller saves and loads a small set of named JSON
//! documents through the [`Storage`] trait: a crash-recovery cache of the
//! frontier, the performance record, and a sorted flat export of every seen
//! URL. Two backends ship with the crate: one document per file on disk
//! ([`JsonFileStorage`]) and a single-table SQLite database
//! ([`SqliteStorage`]).

mod json;
mod sqlite;

pub use json::JsonFileStorage;
pub use sqlite::SqliteStorage;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A persisted document body.
pub type Document = serde_json::Value;

/// Well-known document: frontier snapshot for crash recovery.
pub const CACHE_DOCUMENT: &str = "cache";

/// Well-known document: the session's performance record.
pub const PERFORMANCE_DOCUMENT: &str = "performance";

/// Well-known document: sorted flat list of every URL ever seen.
pub const SEEN_URLS_DOCUMENT: &str = "seen_urls";

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("Invalid document name: {0}")]
    InvalidName(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A durable store of named documents.
///
/// Backends only need create-or-replace, read, and existence-check; the
/// controller treats in-loop persistence as best-effort and never depends on
/// transactional behavior across documents.
pub trait Storage {
    /// Writes a document, creating or replacing it.
    fn save_or_create(&mut self, name: &str, data: &Document) -> StorageResult<()>;

    /// Reads a document. Fails with [`StorageError::DocumentNotFound`] when
    /// it does not exist.
    fn get(&self, name: &str) -> StorageResult<Document>;

    /// True when a document with this name exists.
    fn has(&self, name: &str) -> bool;
}

/// Body of the crash-recovery cache document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    pub spider: String,
    pub timestamp: DateTime<Utc>,
    pub urls_to_visit: Vec<String>,
    pub visited_urls: Vec<String>,
}

/// Document names may only use lowercase alphanumerics, `-` and `_`, which
/// keeps the file backend free of path traversal concerns.
pub(crate) fn validate_name(name: &str) -> StorageResult<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_accepts_well_known_documents() {
        assert!(validate_name(CACHE_DOCUMENT).is_ok());
        assert!(validate_name(PERFORMANCE_DOCUMENT).is_ok());
        assert!(validate_name(SEEN_URLS_DOCUMENT).is_ok());
    }

    #[test]
    fn test_validate_name_rejects_traversal() {
        assert!(validate_name("../evil").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("").is_err());
        assert!(validate_name("Upper").is_err());
    }

    #[test]
    fn test_cache_document_roundtrip() {
        let doc = CacheDocument {
            spider: "products".to_string(),
            timestamp: Utc::now(),
            urls_to_visit: vec!["http://example.com/a".to_string()],
            visited_urls: vec!["http://example.com/".to_string()],
        };

        let value = serde_json::to_value(&doc).unwrap();
        let parsed: CacheDocument = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, doc);
    }
}
