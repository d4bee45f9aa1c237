//! Proxy configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VANT_HOST` - Bind address (default: 127.0.0.1)
//! - `VANT_PORT` - Listen port (default: 3000)
//! - `VANT_PUBLIC_URL` - Public URL of this server (default: `http://localhost:{port}`)
//! - `VANT_API_BASE_URL` - External API base URL (default: the public URL, meaning no backend)
//! - `VANT_UPSTREAM_TIMEOUT_SECS` - Timeout for backend requests (default: 10)
//! - `VANT_BRAND_CACHE_TTL_SECS` - Brand cache lifetime (default: 60)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Proxy server configuration.
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin clients reach this server on
    pub public_url: Url,
    /// External API base URL
    pub api_base_url: Url,
    /// Timeout for each backend request
    pub upstream_timeout: Duration,
    /// How long brand reads stay cached
    pub brand_cache_ttl: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    pub sentry_sample_rate: f32,
    pub sentry_traces_sample_rate: f32,
}

impl ProxyConfig {
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
        let env = Env(&lookup);

        let host = env.parse_or("VANT_HOST", "127.0.0.1")?;
        let port: u16 = env.parse_or("VANT_PORT", "3000")?;
        let public_url = env.url_or("VANT_PUBLIC_URL", &format!("http://localhost:{port}"))?;
        let api_base_url = match env.optional("VANT_API_BASE_URL") {
            Some(raw) => env.url_or("VANT_API_BASE_URL", &raw)?,
            None => public_url.clone(),
        };
        let upstream_timeout = Duration::from_secs(env.parse_or("VANT_UPSTREAM_TIMEOUT_SECS", "10")?);
        let brand_cache_ttl = Duration::from_secs(env.parse_or("VANT_BRAND_CACHE_TTL_SECS", "60")?);

        Ok(Self {
            host,
            port,
            public_url,
            api_base_url,
            upstream_timeout,
            brand_cache_ttl,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// The external API, when it lives on a different origin than this server.
    #[must_use]
    pub fn backend_url(&self) -> Option<&Url> {
        (self.api_base_url.origin() != self.public_url.origin()).then_some(&self.api_base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<'a, F: Fn(&str) -> Option<String>>(&'a F);

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    /// Get an optional variable; blank counts as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key)
            .unwrap_or_else(|| default.to_string())
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    }

    fn url_or(&self, key: &str, default: &str) -> Result<Url, ConfigError> {
        self.parse_or(key, default)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ProxyConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ProxyConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.public_url.as_str(), "http://localhost:3000/");
        assert!(config.backend_url().is_none());
        assert_eq!(config.brand_cache_ttl, Duration::from_secs(60));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_public_url_follows_port() {
        let config = config(&[("VANT_PORT", "8080")]).unwrap();
        assert_eq!(config.public_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.api_base_url, config.public_url);
    }

    #[test]
    fn test_backend_on_other_origin() {
        let config = config(&[("VANT_API_BASE_URL", "https://api.vant.app/v1")]).unwrap();
        assert_eq!(
            config.backend_url().map(Url::as_str),
            Some("https://api.vant.app/v1")
        );

        let config = config_same_origin();
        assert!(config.backend_url().is_none());
    }

    fn config_same_origin() -> ProxyConfig {
        config(&[
            ("VANT_PUBLIC_URL", "https://vant.app"),
            ("VANT_API_BASE_URL", "https://vant.app/api"),
        ])
        .unwrap()
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("VANT_PORT", "eighty")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "VANT_PORT"
        ));
        assert!(matches!(
            config(&[("VANT_HOST", "localhost")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "VANT_HOST"
        ));
        assert!(matches!(
            config(&[("SENTRY_SAMPLE_RATE", "most")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "SENTRY_SAMPLE_RATE"
        ));
    }
}
