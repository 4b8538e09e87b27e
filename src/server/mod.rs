//! Hosted document and object store for the Lake Dillon planner.
//!
//! # Endpoints
//!
//! - `GET /health`: Health check
//! - `GET|PUT /documents/{collection}/{key}`: Whole JSON documents
//! - `GET|PUT /objects/{*path}`: Raw photo bytes; `PUT` answers `{ "url": ... }`

mod config;
mod documents;
mod objects;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use lake_dillon_core::{FileDocumentStore, FileObjectStore, StoreError, MAX_UPLOAD_BYTES};
use serde::Serialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;

/// Request bodies above this are refused before reaching a handler.
const MAX_BODY_BYTES: usize = 2 * MAX_UPLOAD_BYTES;

/// Application state shared across handlers.
///
/// Writes take the store's write lock, so concurrent PUTs land one after
/// another and the last one wins.
#[derive(Clone)]
pub struct AppState {
    documents: Arc<RwLock<FileDocumentStore>>,
    objects: Arc<RwLock<FileObjectStore>>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            documents: Arc::new(RwLock::new(FileDocumentStore::new(config.documents_dir()))),
            objects: Arc::new(RwLock::new(FileObjectStore::new(
                config.objects_dir(),
                config.objects_url(),
            ))),
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Failure of a handler, rendered as `{ "error": ... }`.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(what: impl std::fmt::Display) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: format!("Not found: {}", what),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        let status = match e {
            StoreError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            _ => {
                tracing::error!("Store error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/documents/{collection}/{key}",
            get(documents::get_document).put(documents::put_document),
        )
        .route(
            "/objects/{*path}",
            get(objects::get_object).put(objects::put_object),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tempfile::TempDir;
    use tower::ServiceExt;

    pub fn app() -> (Router, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = ServerConfig::new(8080, temp.path(), "http://localhost:8080");
        (router(AppState::new(&config)), temp)
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }
}
