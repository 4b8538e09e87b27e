//! Synchronizer error types.

use crate::store::{DocumentPath, StoreError};

/// The last failure seen by a synchronizer.
///
/// None of these are fatal: the synchronizer keeps serving its local
/// timeline and records the failure for display.
#[derive(Debug)]
pub enum SyncError {
    /// Reading the document failed; the seed was used instead.
    Load(DocumentPath, StoreError),
    /// The stored document could not be parsed as a timeline.
    Malformed(DocumentPath, String),
    /// Writing the document failed.
    Save(DocumentPath, StoreError),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Load(path, e) => write!(f, "Failed to load {}: {}", path, e),
            SyncError::Malformed(path, e) => write!(f, "Document {} is malformed: {}", path, e),
            SyncError::Save(path, e) => write!(f, "Failed to save {}: {}", path, e),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Load(_, e) | SyncError::Save(_, e) => Some(e),
            SyncError::Malformed(..) => None,
        }
    }
}
