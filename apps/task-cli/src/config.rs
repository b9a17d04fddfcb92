//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, including the API prefix.
    pub base_url: String,
    /// Fixed timeout for every request.
    pub timeout: Duration,
    /// Override for the token file location.
    pub token_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("TASKDECK_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".to_string()),
            timeout: Duration::from_secs(
                env::var("TASKDECK_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            token_path: env::var("TASKDECK_TOKEN_PATH").ok().map(PathBuf::from),
        }
    }
}
