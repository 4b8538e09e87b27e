//! Whole-document reads and writes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use lake_dillon_core::{DocumentPath, DocumentStore};
use serde_json::Value;

use super::{ApiError, AppState};

pub async fn get_document(
    State(state): State<AppState>,
    Path((collection, key)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let path = DocumentPath::new(collection, key)?;
    let documents = state.documents.read().await;
    match documents.get(&path)? {
        Some(document) => Ok(Json(document)),
        None => Err(ApiError::not_found(&path)),
    }
}

/// Replaces the document wholesale. The last write wins.
pub async fn put_document(
    State(state): State<AppState>,
    Path((collection, key)): Path<(String, String)>,
    Json(document): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let path = DocumentPath::new(collection, key)?;
    state.documents.write().await.set(&path, &document)?;
    tracing::debug!(document = %path, "document written");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{app, send};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::json;

    fn put(uri: &str, body: &serde_json::Value) -> Request<Body> {
        Request::put(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_document_is_404() {
        let (app, _temp) = app();
        let (status, body) = send(
            &app,
            Request::get("/documents/timelines/nope").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("timelines/nope"));
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (app, temp) = app();
        let doc = json!({ "id": "trip", "days": [] });

        let (status, _) = send(&app, put("/documents/timelines/trip", &doc)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(temp.path().join("documents/timelines/trip.json").exists());

        let (status, body) = send(
            &app,
            Request::get("/documents/timelines/trip").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<serde_json::Value>(&body).unwrap(), doc);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_document() {
        let (app, _temp) = app();
        send(&app, put("/documents/packingLists/jason", &json!({ "a": 1, "b": 2 }))).await;
        send(&app, put("/documents/packingLists/jason", &json!({ "b": 3 }))).await;

        let (_, body) = send(
            &app,
            Request::get("/documents/packingLists/jason").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(
            serde_json::from_slice::<serde_json::Value>(&body).unwrap(),
            json!({ "b": 3 })
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_puts_all_succeed() {
        let (app, _temp) = app();

        let tasks: Vec<_> = (0..64)
            .map(|n| {
                let app = app.clone();
                tokio::spawn(async move {
                    let doc = json!({ "id": "trip", "writer": n, "days": [] });
                    send(&app, put("/documents/timelines/trip", &doc)).await.0
                })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap(), StatusCode::NO_CONTENT);
        }

        let (status, body) = send(
            &app,
            Request::get("/documents/timelines/trip").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(doc["writer"].as_u64().unwrap() < 64);
    }

    #[tokio::test]
    async fn test_invalid_key_is_400() {
        let (app, _temp) = app();
        let (status, _) = send(&app, put("/documents/timelines/..", &json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
