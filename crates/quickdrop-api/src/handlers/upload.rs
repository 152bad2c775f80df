//! Upload page and upload pipeline.

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::templates::{self, IndexPage};
use axum::{
    extract::multipart::MultipartError,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use quickdrop_core::models::NewFileRecord;
use quickdrop_processing::{extract_text, is_unsafe_file, render_qr_png};
use quickdrop_storage::UploadStore;
use std::sync::Arc;

const FILE_TOO_LARGE_MESSAGE: &str = "File is too large. Max limit is 25 MB.";

/// `GET /` - the upload form.
pub async fn upload_form() -> Response {
    templates::render_index(&IndexPage::empty()).into_response()
}

/// `POST /` - accept a multipart upload, run the pipeline, render the share
/// page.
///
/// Pipeline stages beyond store-and-register (safety check, description,
/// filename suggestion, QR code) are driven by capability flags; AI failures
/// degrade to placeholder text instead of failing the upload.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let upload = match read_file_field(multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return Ok(templates::render_index(&IndexPage::with_error("No file selected"))
                .into_response())
        }
        Err(err) => return Ok(multipart_error_response(err)),
    };

    if state.config.file_type_check_enabled && is_unsafe_file(&upload.data, &upload.filename) {
        tracing::warn!(filename = %upload.filename, "Blocked unsafe file type");
        return Ok(templates::render_index(&IndexPage::with_error(
            "Malicious or unsupported file detected.",
        ))
        .into_response());
    }

    let storage_key = UploadStore::unique_key(&upload.filename);
    let file_path = state.store.save(&storage_key, &upload.data).await?;

    let extracted_text = extract_text(&upload.filename, &upload.data);

    let description = match &state.ai {
        Some(ai) => Some(ai.describe(&extracted_text).await),
        None => None,
    };

    let suggested_filename = match (&state.ai, state.config.filename_suggestion_enabled) {
        (Some(ai), true) => ai.suggest_filename(&extracted_text).await,
        _ => None,
    };

    // The QR image path is fixed before insertion so the record owns it from
    // the start; the PNG itself is written right after the link id exists.
    let qr_key = state
        .config
        .qr_enabled
        .then(|| format!("qr_{}.png", uuid_prefix(&storage_key)));
    let qr_path = match &qr_key {
        Some(key) => Some(state.store.key_to_path(key)?),
        None => None,
    };

    let id = state.registry.insert(NewFileRecord {
        file_path,
        qr_path,
        original_filename: upload.filename.clone(),
        content_type: upload.content_type.clone(),
        extracted_text,
    });

    let share_link = format!("{}/{}", state.config.base_url.trim_end_matches('/'), id);
    tracing::info!(link_id = %id, filename = %upload.filename, "Upload registered");

    let mut qr_url = None;
    if let Some(key) = qr_key {
        match render_qr_png(&share_link) {
            Ok(png) => {
                state.store.save(&key, &png).await?;
                qr_url = Some(format!("/uploads/{key}"));
            }
            Err(e) => {
                tracing::warn!(error = %e, link_id = %id, "QR rendering failed, continuing");
            }
        }
    }

    Ok(templates::render_index(&IndexPage {
        link: Some(share_link),
        error: None,
        description,
        suggested_filename,
        qr_url,
    })
    .into_response())
}

struct Upload {
    filename: String,
    content_type: String,
    data: Bytes,
}

/// Pull the `file` field out of the multipart body. `Ok(None)` means no file
/// was selected.
async fn read_file_field(mut multipart: Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Ok(None);
        }

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field.bytes().await?;

        return Ok(Some(Upload {
            filename,
            content_type,
            data,
        }));
    }

    Ok(None)
}

fn multipart_error_response(err: MultipartError) -> Response {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return (StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE_MESSAGE).into_response();
    }

    tracing::debug!(error = %err, "Malformed multipart upload");
    (
        StatusCode::BAD_REQUEST,
        templates::render_index(&IndexPage::with_error("Invalid upload request")),
    )
        .into_response()
}

fn uuid_prefix(storage_key: &str) -> &str {
    storage_key.split('_').next().unwrap_or(storage_key)
}
