//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use quickdrop_core::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/",
            get(handlers::upload::upload_form).post(handlers::upload::upload_file),
        )
        .route(
            "/uploads/{filename}",
            get(handlers::public_file::serve_upload),
        )
        .route("/ask_ai", post(handlers::ask_ai::ask_ai))
        // catch-all single segment; static routes above take precedence
        .route("/{id}", get(handlers::download::download_file))
        .layer(DefaultBodyLimit::max(config.max_upload_size_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
