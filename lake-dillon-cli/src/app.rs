//! Application root: picks the storage backends from config and owns the
//! single timeline synchronizer every command shares.

use std::error::Error;

use lake_dillon_core::{
    DocumentStore, FileDocumentStore, FileObjectStore, HttpDocumentStore, HttpObjectStore,
    ObjectStore, PackingLists, PhotoUploader, StoreError, TimelineSync,
};

use crate::config::Config;

pub type Documents = Box<dyn DocumentStore>;
pub type Objects = Box<dyn ObjectStore>;

pub struct App {
    timeline: TimelineSync<Documents>,
    packing: PackingLists<Documents>,
    uploader: PhotoUploader<Objects>,
}

impl App {
    /// Builds the app from explicit stores. `documents` is called once per
    /// consumer so each gets its own handle.
    pub fn new<F>(
        documents: F,
        objects: Objects,
        trip_id: &str,
        uploaded_by: Option<String>,
    ) -> Result<Self, StoreError>
    where
        F: Fn() -> Documents,
    {
        Ok(Self {
            timeline: TimelineSync::new(documents(), trip_id)?,
            packing: PackingLists::new(documents()),
            uploader: PhotoUploader::new(objects).uploaded_by(uploaded_by),
        })
    }

    /// Uses the hosted server when `remote.server_url` is set, otherwise the
    /// file stores under `data_dir`.
    pub fn from_config(config: &Config) -> Result<Self, Box<dyn Error>> {
        let trip_id = &config.trip_id.value;
        let uploaded_by = config.uploaded_by.value.clone();

        let app = match config.remote.server_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => {
                tracing::debug!(server = url, "using hosted store");
                let base = url.to_string();
                Self::new(
                    || Box::new(HttpDocumentStore::new(base.clone())) as Documents,
                    Box::new(HttpObjectStore::new(url)),
                    trip_id,
                    uploaded_by,
                )?
            }
            _ => {
                let docs_dir = config.documents_dir();
                tracing::debug!(dir = %docs_dir.display(), "using local store");
                Self::new(
                    || Box::new(FileDocumentStore::new(docs_dir.clone())) as Documents,
                    Box::new(FileObjectStore::local(config.objects_dir())),
                    trip_id,
                    uploaded_by,
                )?
            }
        };
        Ok(app)
    }

    /// The synchronizer, loaded on first use.
    pub fn timeline(&mut self) -> &mut TimelineSync<Documents> {
        if !self.timeline.is_ready() {
            self.timeline.load();
            if let Some(e) = self.timeline.error() {
                eprintln!("Warning: {} (showing the default trip plan)", e);
            }
        }
        &mut self.timeline
    }

    pub fn packing(&self) -> &PackingLists<Documents> {
        &self.packing
    }

    pub fn uploader(&self) -> &PhotoUploader<Objects> {
        &self.uploader
    }
}
