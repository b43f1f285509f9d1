#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use fixtrack_api::config::{LlmConfig, ServerConfig};
use fixtrack_api::media::MediaStore;
use fixtrack_api::router::build_app_router;
use fixtrack_api::state::AppState;
use fixtrack_estimator::Estimator;

/// Boundary used by [`multipart_body`].
pub const MULTIPART_BOUNDARY: &str = "test-boundary-1d8ab0";

/// Build a test `ServerConfig` with safe defaults and the given upload root.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_string_lossy().into_owned(),
        upload_allowed_exts: fixtrack_core::upload::DEFAULT_ALLOWED_EXTENSIONS
            .iter()
            .map(|s| s.to_string())
            .collect(),
        upload_max_bytes: 52_428_800,
        llm: LlmConfig {
            enabled: false,
            api_key: String::new(),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout_secs: 20,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and storing attachments under `upload_root`.
///
/// Uses the same [`build_app_router`] as `main.rs`, so integration tests
/// exercise the exact middleware stack production uses. The estimator is
/// heuristic-only; tests never call an external backend.
pub fn build_test_app(pool: SqlitePool, upload_root: &Path) -> Router {
    let config = test_config(upload_root);
    let media = MediaStore::new(upload_root, config.upload_allowed_exts.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media: Arc::new(media),
        estimator: Arc::new(Estimator::heuristic_only()),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with an urlencoded form body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a multipart body built by [`multipart_body`].
pub async fn post_multipart(app: Router, uri: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as raw bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

// ---------------------------------------------------------------------------
// Multipart assembly
// ---------------------------------------------------------------------------

/// Assemble a `multipart/form-data` body from text fields plus an optional
/// `(field_name, file_name, content)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((name, filename, content)) = file {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// Multipart body for a typical valid submission with the given title.
pub fn submission_body(title: &str) -> Vec<u8> {
    multipart_body(
        &[
            ("title", title),
            ("location", "Building A, Room 3"),
            ("category", "Plumbing"),
            ("urgency", "High"),
            ("description", "Drips constantly"),
            ("contact", "reporter@campus.edu"),
        ],
        None,
    )
}
