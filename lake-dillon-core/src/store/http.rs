//! Document store backed by the hosted store server.
//!
//! `GET {base}/documents/{collection}/{key}` returns the JSON document or
//! 404, `PUT` with a JSON body overwrites it.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;

use super::{DocumentPath, DocumentStore, StoreError};

#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    base_url: String,
    client: Client,
}

impl HttpDocumentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds the endpoint URL for a document.
    pub fn document_url(&self, path: &DocumentPath) -> String {
        format!(
            "{}/documents/{}/{}",
            self.base_url,
            urlencoding::encode(path.collection()),
            urlencoding::encode(path.key())
        )
    }
}

impl DocumentStore for HttpDocumentStore {
    fn get(&self, path: &DocumentPath) -> Result<Option<Value>, StoreError> {
        let response = self
            .client
            .get(self.document_url(path))
            .send()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => response
                .json()
                .map(Some)
                .map_err(|e| StoreError::Malformed {
                    path: path.to_string(),
                    message: e.to_string(),
                }),
            status => Err(StoreError::Status(status.as_u16())),
        }
    }

    fn set(&self, path: &DocumentPath, document: &Value) -> Result<(), StoreError> {
        let response = self
            .client
            .put(self.document_url(path))
            .json(document)
            .send()
            .map_err(|e| StoreError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StoreError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_url() {
        let store = HttpDocumentStore::new("http://localhost:8080/");
        let path = DocumentPath::packing_list("jason").unwrap();
        assert_eq!(store.base_url(), "http://localhost:8080");
        assert_eq!(
            store.document_url(&path),
            "http://localhost:8080/documents/packingLists/jason"
        );
    }

    #[test]
    fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) is closed on test hosts
        let store = HttpDocumentStore::new("http://127.0.0.1:9");
        let path = DocumentPath::timeline("trip").unwrap();
        assert!(matches!(store.get(&path), Err(StoreError::Http(_))));
    }
}
