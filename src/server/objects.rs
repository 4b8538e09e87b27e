//! Photo bytes.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use lake_dillon_core::objects::content_type_for;
use lake_dillon_core::{validate_upload, ObjectStore, UploadError};
use serde::Serialize;

use super::{ApiError, AppState};

#[derive(Serialize)]
pub struct PutObjectResponse {
    url: String,
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::Store(e) => e.into(),
            UploadError::TooLarge { .. } => ApiError {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: e.to_string(),
            },
            _ => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: e.to_string(),
            },
        }
    }
}

pub async fn put_object(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PutObjectResponse>, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");
    validate_upload(content_type, body.len())?;

    let url = state.objects.write().await.put(&path, &body, content_type)?;
    tracing::info!(object = %path, size = body.len(), "object stored");
    Ok(Json(PutObjectResponse { url }))
}

pub async fn get_object(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state
        .objects
        .read()
        .await
        .get(&path)?
        .ok_or_else(|| ApiError::not_found(&path))?;
    let content_type = content_type_for(&path).unwrap_or("application/octet-stream");
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
