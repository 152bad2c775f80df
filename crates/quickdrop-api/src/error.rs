//! HTTP error response conversion.
//!
//! Wrapper type for AppError to implement IntoResponse; Rust's orphan rules
//! keep us from implementing IntoResponse (external trait) for AppError
//! (external type from quickdrop-core) directly.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quickdrop_core::{AppError, LogLevel};

#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

impl From<quickdrop_storage::StorageError> for HttpAppError {
    fn from(err: quickdrop_storage::StorageError) -> Self {
        HttpAppError(AppError::Storage(err.to_string()))
    }
}

fn log_error(error: &AppError) {
    match error.log_level() {
        LogLevel::Debug => tracing::debug!(error = %error, "Request failed"),
        LogLevel::Warn => tracing::warn!(error = %error, "Request failed"),
        LogLevel::Error => tracing::error!(error = %error, "Request failed"),
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        log_error(&self.0);

        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, self.0.client_message()).into_response()
    }
}
