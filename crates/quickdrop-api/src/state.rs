//! Shared application state.
//!
//! The registry and store are explicitly owned here and passed by handle to
//! handlers and the janitor rather than living as module-level globals, so
//! tests can spin up independent instances.

use quickdrop_ai::GeminiClient;
use quickdrop_core::Config;
use quickdrop_registry::LinkRegistry;
use quickdrop_storage::UploadStore;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub registry: Arc<LinkRegistry>,
    pub store: UploadStore,
    /// None when no API key is configured; AI features degrade to
    /// placeholders.
    pub ai: Option<GeminiClient>,
}
