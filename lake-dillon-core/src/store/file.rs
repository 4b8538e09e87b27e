//! Filesystem document store.
//!
//! Layout:
//! ```text
//! <root>/
//!   timelines/
//!     lake-dillon-thanksgiving-2025.json
//!   packingLists/
//!     leah.json
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;

use super::{DocumentPath, DocumentStore, StoreError};

const DOC_EXTENSION: &str = "json";

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the full path for a document.
    pub fn doc_path(&self, path: &DocumentPath) -> PathBuf {
        self.root
            .join(path.collection())
            .join(format!("{}.{}", path.key(), DOC_EXTENSION))
    }

    /// A temp file next to the document, unique to this write.
    fn temp_path(&self, path: &DocumentPath) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.root.join(path.collection()).join(format!(
            ".{}.{}.{}.tmp",
            path.key(),
            std::process::id(),
            seq
        ))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl DocumentStore for FileDocumentStore {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let file = self.doc_path(path);

        let bytes = match fs::read(&file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&file)(e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Malformed {
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        let file = self.doc_path(path);
        let dir = self.root.join(path.collection());
        fs::create_dir_all(&dir).map_err(io_error(&dir))?;

        let bytes = serde_json::to_vec_pretty(document).map_err(|e| StoreError::Malformed {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        // Write to a sibling temp file, then rename over the target
        let temp = self.temp_path(path);
        let written = File::create(&temp).and_then(|mut out| {
            out.write_all(&bytes)?;
            out.sync_all()
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(io_error(&temp)(e));
        }

        fs::rename(&temp, &file).map_err(io_error(&file))?;
        tracing::debug!(document = %path, "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_returns_none() {
        let temp = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp.path());
        let path = DocumentPath::timeline("trip").unwrap();
        assert!(store.get(&path).unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp.path().join("nested"));
        let path = DocumentPath::packing_list("walker").unwrap();
        let doc = json!({"items": [{"id": "1"}]});

        store.set(&path, &doc).unwrap();

        let dir = temp.path().join("nested/packingLists");
        let names: Vec<_> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["walker.json"]);
        assert_eq!(store.get(&path).unwrap(), Some(doc));
    }

    #[test]
    fn test_concurrent_writers_do_not_collide() {
        let temp = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp.path());
        let path = DocumentPath::timeline("trip").unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|n| {
                    let (store, path) = (&store, &path);
                    scope.spawn(move || {
                        for round in 0..8 {
                            store.set(path, &json!({ "writer": n, "round": round }))?;
                        }
                        Ok::<_, StoreError>(())
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        let doc = store.get(&path).unwrap().unwrap();
        assert_eq!(doc["round"], 7);
        assert_eq!(fs::read_dir(temp.path().join("timelines")).unwrap().count(), 1);
    }

    #[test]
    fn test_malformed_document() {
        let temp = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp.path());
        let path = DocumentPath::timeline("trip").unwrap();
        fs::create_dir_all(temp.path().join("timelines")).unwrap();
        fs::write(store.doc_path(&path), b"{not json").unwrap();

        let err = store.get(&path).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }
}
