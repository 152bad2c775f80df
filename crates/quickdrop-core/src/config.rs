//! Configuration module
//!
//! All settings come from the environment (with `.env` support via dotenvy).
//! Optional pipeline stages (QR codes, filename suggestion, file-type
//! blocking) are capability flags so one binary covers every deployment
//! variant.

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const LINK_TTL_SECS: u64 = 15 * 60;
const CLEANUP_INTERVAL_SECS: u64 = 60;
const MAX_UPLOAD_SIZE_MB: usize = 25;
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Public base URL used to build share links and QR codes
    pub base_url: String,
    /// Directory where uploaded files (and QR images) are stored
    pub upload_dir: String,
    /// How long a share link stays valid
    pub link_ttl: Duration,
    /// How often the janitor sweeps for expired links
    pub cleanup_interval: Duration,
    pub max_upload_size_bytes: usize,
    /// Gemini API key; when absent, AI features degrade to placeholders
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    // Capability flags
    pub qr_enabled: bool,
    pub filename_suggestion_enabled: bool,
    pub file_type_check_enabled: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let server_port = env::var("PORT")
            .unwrap_or_else(|_| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .unwrap_or(DEFAULT_PORT);

        let base_url = env::var("BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", server_port));

        let link_ttl_secs = env::var("LINK_TTL_SECS")
            .unwrap_or_else(|_| LINK_TTL_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(LINK_TTL_SECS);

        let cleanup_interval_secs = env::var("CLEANUP_INTERVAL_SECS")
            .unwrap_or_else(|_| CLEANUP_INTERVAL_SECS.to_string())
            .parse::<u64>()
            .unwrap_or(CLEANUP_INTERVAL_SECS);

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let google_api_key = env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Config {
            server_port,
            base_url,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string()),
            link_ttl: Duration::from_secs(link_ttl_secs),
            cleanup_interval: Duration::from_secs(cleanup_interval_secs),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            google_api_key,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            qr_enabled: env_flag("QR_ENABLED", true),
            filename_suggestion_enabled: env_flag("FILENAME_SUGGESTION_ENABLED", true),
            file_type_check_enabled: env_flag("FILE_TYPE_CHECK_ENABLED", true),
        })
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(value) => matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        Err(_) => default,
    }
}
