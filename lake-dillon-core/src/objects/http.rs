//! Object storage on the hosted store server (`PUT /objects/{path}`).

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;

use super::{validate_object_path, ObjectStore};
use crate::store::StoreError;

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

#[derive(Debug, Clone)]
pub struct HttpObjectStore {
    base_url: String,
    client: Client,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Endpoint for an object, each path segment percent-encoded.
    pub fn object_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/objects/{}", self.base_url, encoded.join("/"))
    }
}

impl ObjectStore for HttpObjectStore {
    fn put(&self, path: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        validate_object_path(path)?;

        let response = self
            .client
            .put(self.object_url(path))
            .header(CONTENT_TYPE, content_type)
            .body(bytes.to_vec())
            .send()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }

        let body: PutResponse = response
            .json()
            .map_err(|e| StoreError::Http(e.to_string()))?;
        Ok(body.url)
    }
}
