//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VANT_ORIGIN` - Origin the app is served from (default: `http://localhost:3000`)
//! - `VANT_API_BASE_URL` - External API base URL (default: the origin, meaning no backend)
//! - `VANT_STATE_DIR` - Directory for durable client storage (default: `.vant`)
//! - `VANT_UPSTREAM_TIMEOUT_SECS` - Per-request timeout (default: 10)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::api::ApiConfig;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_STATE_DIR: &str = ".vant";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    /// Where durable storage lives.
    pub state_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let origin = parse_url("VANT_ORIGIN", &get_or_default("VANT_ORIGIN", DEFAULT_ORIGIN))?;
        let base_url = match lookup("VANT_API_BASE_URL") {
            Some(raw) if !raw.trim().is_empty() => parse_url("VANT_API_BASE_URL", &raw)?,
            _ => origin.clone(),
        };
        let timeout_secs = get_or_default("VANT_UPSTREAM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("VANT_UPSTREAM_TIMEOUT_SECS".to_string(), e.to_string()))?;
        let state_dir = PathBuf::from(get_or_default("VANT_STATE_DIR", DEFAULT_STATE_DIR));

        let mut api = ApiConfig::new(base_url, origin);
        api.timeout = Duration::from_secs(timeout_secs);

        Ok(Self { api, state_dir })
    }
}

fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
