//! Share-link download handler.

use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use quickdrop_core::models::LinkId;
use std::sync::Arc;

/// `GET /{id}` - stream the file behind a share link, or 404 once the link
/// has expired. A missing backing file also evicts the stale registry entry
/// (inside `lookup`).
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let link_id = LinkId::new(id);

    let Some(record) = state.registry.lookup(&link_id).await else {
        return (StatusCode::NOT_FOUND, "Invalid or expired link").into_response();
    };

    let stream = match state.store.read_stream(&record.file_path).await {
        Ok(stream) => stream,
        Err(e) => {
            // lost a race with the janitor or an external delete
            tracing::debug!(link_id = %link_id, error = %e, "Backing file gone at stream time");
            return (StatusCode::NOT_FOUND, "File not found or expired").into_response();
        }
    };

    let body_stream =
        stream.map(|result| result.map_err(|e| std::io::Error::other(e.to_string())));

    tracing::debug!(link_id = %link_id, path = %record.file_path.display(), "Serving download");

    let content_disposition = format!(
        "attachment; filename=\"{}\"",
        quickdrop_storage::sanitize_filename(&record.original_filename)
    );

    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, record.content_type.as_str())
        .header(header::CONTENT_DISPOSITION, content_disposition.as_str())
        .body(Body::from_stream(body_stream))
    {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build download response");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}
