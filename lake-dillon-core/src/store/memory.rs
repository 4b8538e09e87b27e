//! In-process document store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use serde_json::Value;

use super::{DocumentPath, DocumentStore, StoreError};

/// Keeps documents in a map. Writes can be switched off to simulate an
/// unreachable backend.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    docs: Mutex<HashMap<DocumentPath, Value>>,
    reject_writes: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every `set` fails with [`StoreError::Unavailable`] and
    /// leaves the stored documents untouched.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.docs.lock().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let docs = self
            .docs
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        Ok(docs.get(path).cloned())
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!("write to {} rejected", path)));
        }
        let mut docs = self
            .docs
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))?;
        docs.insert(path.clone(), document.clone());
        Ok(())
    }
}
