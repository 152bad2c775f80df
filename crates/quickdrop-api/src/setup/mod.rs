//! Application initialization: state, routes, server.

pub mod routes;
pub mod server;

use crate::state::AppState;
use axum::Router;
use quickdrop_ai::GeminiClient;
use quickdrop_core::Config;
use quickdrop_registry::LinkRegistry;
use quickdrop_storage::UploadStore;
use std::sync::Arc;

/// Build the shared state and router from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let store = UploadStore::new(&config.upload_dir).await?;
    let registry = Arc::new(LinkRegistry::new());

    let ai = match &config.google_api_key {
        Some(key) => Some(GeminiClient::new(key, &config.gemini_model)?),
        None => {
            tracing::warn!("GOOGLE_API_KEY not set; AI description and Q&A are disabled");
            None
        }
    };

    let state = Arc::new(AppState {
        config: config.clone(),
        registry,
        store,
        ai,
    });

    let router = routes::setup_routes(&config, state.clone());
    Ok((state, router))
}
