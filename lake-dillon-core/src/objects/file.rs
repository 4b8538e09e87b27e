//! Object storage on the local filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{validate_object_path, ObjectStore};
use crate::store::StoreError;

/// Stores objects under a root directory and hands out URLs formed from a
/// public base URL plus the object path.
#[derive(Debug, Clone)]
pub struct FileObjectStore {
    root: PathBuf,
    public_base: String,
}

impl FileObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// A store whose URLs are `file://` URLs of the stored files.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let base = format!("file://{}", root.display());
        Self::new(root, base)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Public URL of an object, each path segment percent-encoded.
    pub fn url_for(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/{}", self.public_base, encoded.join("/"))
    }

    fn object_file(&self, path: &str) -> Result<PathBuf, StoreError> {
        validate_object_path(path)?;
        Ok(self.root.join(path))
    }

    /// Reads an object back. Returns `Ok(None)` when it does not exist.
    pub fn get(&self, path: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let file = self.object_file(path)?;
        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path: file, source }),
        }
    }
}

impl ObjectStore for FileObjectStore {
    fn put(&self, path: &str, bytes: &[u8], _content_type: &str) -> Result<String, StoreError> {
        let file = self.object_file(path)?;
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&file, bytes).map_err(|source| StoreError::Io {
            path: file.clone(),
            source,
        })?;
        Ok(self.url_for(path))
    }
}
