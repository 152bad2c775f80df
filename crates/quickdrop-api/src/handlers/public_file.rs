//! Serves generated QR images out of the uploads directory.

use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use std::sync::Arc;

/// `GET /uploads/{filename}` - serve a generated QR image by filename.
/// Only QR image keys are served; stored uploads are reachable through
/// their share link alone. Key validation in the store rejects traversal
/// attempts.
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    if !filename.starts_with("qr_") || !filename.ends_with(".png") {
        tracing::debug!(filename = %filename, "Rejected non-QR uploads request");
        return (StatusCode::NOT_FOUND, "File not found").into_response();
    }

    let path = match state.store.key_to_path(&filename) {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(filename = %filename, error = %e, "Rejected uploads path");
            return (StatusCode::NOT_FOUND, "File not found").into_response();
        }
    };

    let stream = match state.store.read_stream(&path).await {
        Ok(stream) => stream,
        Err(_) => return (StatusCode::NOT_FOUND, "File not found").into_response(),
    };

    let body_stream =
        stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string())));

    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/png")
        .body(Body::from_stream(body_stream))
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build file response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
