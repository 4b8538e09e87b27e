//! JSON document storage.
//!
//! Documents are addressed by a two-part [`DocumentPath`] (`collection/key`)
//! and always written whole. There is no versioning and no merge: the last
//! `set` wins.
//!
//! Backends:
//! - [`MemoryDocumentStore`] keeps everything in a map (tests, offline use)
//! - [`FileDocumentStore`] stores `<root>/<collection>/<key>.json`
//! - [`HttpDocumentStore`] talks to the hosted store server

mod file;
mod http;
mod memory;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

pub use file::FileDocumentStore;
pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Collection holding the shared trip timeline.
pub const TIMELINES: &str = "timelines";

/// Collection holding one packing list per family member.
pub const PACKING_LISTS: &str = "packingLists";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid document path segment: {0:?}")]
    InvalidPath(String),

    #[error("I/O error for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Server returned status {0}")]
    Status(u16),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Location of a single document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    key: String,
}

impl DocumentPath {
    /// Builds a path, rejecting segments that could escape a directory.
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Result<Self, StoreError> {
        let collection = collection.into();
        let key = key.into();
        validate_segment(&collection)?;
        validate_segment(&key)?;
        Ok(Self { collection, key })
    }

    pub fn timeline(trip_id: &str) -> Result<Self, StoreError> {
        Self::new(TIMELINES, trip_id)
    }

    pub fn packing_list(member_id: &str) -> Result<Self, StoreError> {
        Self::new(PACKING_LISTS, member_id)
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.key)
    }
}

/// Rejects empty segments, separators and dot-prefixed names.
pub fn validate_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty()
        || segment.contains('/')
        || segment.contains('\\')
        || segment.contains("..")
        || segment.starts_with('.')
    {
        return Err(StoreError::InvalidPath(segment.to_string()));
    }
    Ok(())
}

/// A key/value store of whole JSON documents.
pub trait DocumentStore {
    /// Returns `Ok(None)` when the document does not exist.
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError>;

    /// Overwrites the document.
    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        (**self).get(path)
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        (**self).set(path, document)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        (**self).get(path)
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        (**self).set(path, document)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        (**self).get(path)
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        (**self).set(path, document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_path_display() {
        let path = DocumentPath::timeline("lake-dillon-thanksgiving-2025").unwrap();
        assert_eq!(path.to_string(), "timelines/lake-dillon-thanksgiving-2025");
        assert_eq!(path.collection(), "timelines");
    }

    #[test]
    fn test_document_path_rejects_traversal() {
        for bad in ["", "..", "../etc", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(DocumentPath::new("timelines", bad), Err(StoreError::InvalidPath(_))),
                "{bad:?} should be rejected"
            );
        }
        assert!(DocumentPath::new("..", "key").is_err());
    }

    #[test]
    fn test_boxed_store_delegates() {
        let store: Box<dyn DocumentStore> = Box::new(MemoryDocumentStore::new());
        let path = DocumentPath::packing_list("leah").unwrap();
        store.set(&path, &serde_json::json!({"items": []})).unwrap();
        assert!(store.get(&path).unwrap().is_some());
    }
}
