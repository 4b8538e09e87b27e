//! Photo upload rules and binary object storage.
//!
//! Uploads are checked locally before anything touches the network: only
//! `image/*` content up to [`MAX_UPLOAD_BYTES`] is accepted. Accepted files
//! are stored under a timestamped object path and turned into a [`Photo`]
//! that can be attached to an activity or meal.

mod file;
mod http;

use std::sync::Arc;

use thiserror::Error;

use crate::models::Photo;
use crate::store::StoreError;

pub use file::FileObjectStore;
pub use http::HttpObjectStore;

/// Largest accepted upload, 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Only image files are allowed (got {0:?})")]
    NotAnImage(String),

    #[error("File is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Upload failed: {0}")]
    Store(#[from] StoreError),
}

/// Checks the content type and size of a file before upload.
pub fn validate_upload(content_type: &str, size: usize) -> Result<(), UploadError> {
    if !content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(UploadError::NotAnImage(content_type.to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(UploadError::TooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Where an uploaded photo belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadTarget {
    /// Attached to a scheduled activity or meal.
    TimelineItem { event_id: String },
    /// Taken from the gallery's quick-upload button.
    Quick,
}

/// Object path for an upload: `timeline-photos/<eventId>/<ts>-<name>` or
/// `quick-photos/<ts>-<name>`.
pub fn object_path(target: &UploadTarget, filename: &str, timestamp_ms: i64) -> String {
    match target {
        UploadTarget::TimelineItem { event_id } => {
            format!("timeline-photos/{}/{}-{}", event_id, timestamp_ms, filename)
        }
        UploadTarget::Quick => format!("quick-photos/{}-{}", timestamp_ms, filename),
    }
}

/// Guesses an image content type from a file extension.
pub fn content_type_for(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        _ => None,
    }
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct PhotoFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Binary object storage returning a retrievable URL for each object.
pub trait ObjectStore {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError>;
}

impl<S: ObjectStore + ?Sized> ObjectStore for &S {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        (**self).put(path, bytes, content_type)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Box<S> {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        (**self).put(path, bytes, content_type)
    }
}

impl<S: ObjectStore + ?Sized> ObjectStore for Arc<S> {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        (**self).put(path, bytes, content_type)
    }
}

/// Rejects object paths with empty, dot-prefixed or traversal segments.
pub(crate) fn validate_object_path(path: &str) -> Result<(), StoreError> {
    if path.is_empty()
        || path.contains('\\')
        || path
            .split('/')
            .any(|seg| seg.is_empty() || seg.starts_with('.'))
    {
        return Err(StoreError::InvalidPath(path.to_string()));
    }
    Ok(())
}

/// Validates and stores photos, producing the [`Photo`] record to attach.
#[derive(Debug, Clone)]
pub struct PhotoUploader<O> {
    objects: O,
    uploaded_by: Option<String>,
}

impl<O: ObjectStore> PhotoUploader<O> {
    pub fn new(objects: O) -> Self {
        Self {
            objects,
            uploaded_by: None,
        }
    }

    /// Records the family member credited for uploads.
    pub fn uploaded_by(mut self, member_id: Option<String>) -> Self {
        self.uploaded_by = member_id.filter(|m| !m.trim().is_empty());
        self
    }

    /// Uploads one file. Nothing is stored when validation fails.
    pub fn upload(
        &self,
        target: &UploadTarget,
        file: &PhotoFile,
        now_ms: i64,
    ) -> Result<Photo, UploadError> {
        validate_upload(&file.content_type, file.bytes.len())?;

        let name = file
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim();
        if name.is_empty() || name.starts_with('.') {
            return Err(UploadError::InvalidFileName(file.filename.clone()));
        }

        let path = object_path(target, name, now_ms);
        let url = self.objects.put(&path, &file.bytes, &file.content_type)?;
        tracing::info!(path = %path, bytes = file.bytes.len(), "uploaded photo");

        let photo = Photo::new(format!("photo-{}", now_ms), url, now_ms);
        Ok(match &self.uploaded_by {
            Some(member) => photo.with_uploaded_by(member.clone()),
            None => photo,
        })
    }
}
