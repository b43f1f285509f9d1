//! Handler for serving stored attachments.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use tokio_util::io::ReaderStream;

use crate::error::{AppError, AppResult};
use crate::media;
use crate::state::AppState;

/// GET /uploads/{reference}
///
/// Streams a stored attachment. Unsafe references (path traversal) are a
/// 400, unknown ones a 404.
pub async fn serve(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> AppResult<Response> {
    let path = state.media.resolve(&reference).await?;

    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let stream = ReaderStream::new(file);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media::content_type_for(&reference))
        .header(header::CONTENT_LENGTH, metadata.len().to_string())
        .body(Body::from_stream(stream))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
