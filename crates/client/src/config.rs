//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLOSSOM_API_BASE_URL` - Base URL of the shop backend (e.g.
//!   `https://shop.example.com/api/v1`)
//!
//! ## Optional
//! - `BLOSSOM_DATA_DIR` - Directory for persisted store records
//!   (default: `.blossom`)
//! - `BLOSSOM_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `TELEGRAM_INIT_DATA` - Opaque init token supplied by the Telegram
//!   container; absent when running outside Telegram

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".blossom";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client application configuration.
///
/// Implements `Debug` manually to redact the init token.
#[derive(Clone)]
pub struct Config {
    /// Backend base URL, normalized to end with a single `/` so endpoint
    /// paths join onto it rather than replacing the last segment.
    pub api_base_url: Url,
    /// Directory holding the persisted store records.
    pub data_dir: PathBuf,
    /// HTTP request timeout in seconds.
    pub http_timeout_secs: u64,
    /// Telegram init token, when running inside the Mini App container.
    pub telegram_init_data: Option<SecretString>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("data_dir", &self.data_dir)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field(
                "telegram_init_data",
                &self.telegram_init_data.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a required variable is missing or a
    /// value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_base_url = require_env("BLOSSOM_API_BASE_URL")?;
        let api_base_url = normalize_base_url(&api_base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("BLOSSOM_API_BASE_URL".into(), e))?;

        let data_dir = std::env::var("BLOSSOM_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let http_timeout_secs = match std::env::var("BLOSSOM_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvVar("BLOSSOM_HTTP_TIMEOUT_SECS".into(), e.to_string())
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let telegram_init_data = std::env::var("TELEGRAM_INIT_DATA")
            .ok()
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        Ok(Self {
            api_base_url,
            data_dir,
            http_timeout_secs,
            telegram_init_data,
        })
    }
}

/// Normalize a base URL so it ends with exactly one slash.
///
/// `Url::join` replaces the last path segment when the base has no
/// trailing slash, which would silently drop `/api/v1`.
pub fn normalize_base_url(raw: &str) -> Result<Url, String> {
    let normalized = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalized).map_err(|e| format!("invalid URL '{raw}': {e}"))
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_adds_trailing_slash() {
        let url = normalize_base_url("https://shop.example.com/api/v1").expect("valid url");
        assert_eq!(url.as_str(), "https://shop.example.com/api/v1/");
    }

    #[test]
    fn test_normalize_base_url_collapses_extra_slashes() {
        let url = normalize_base_url("https://shop.example.com/api/v1///").expect("valid url");
        assert_eq!(url.as_str(), "https://shop.example.com/api/v1/");
    }

    #[test]
    fn test_normalize_base_url_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_debug_redacts_init_data() {
        let config = Config {
            api_base_url: normalize_base_url("https://shop.example.com/api/v1").expect("valid"),
            data_dir: PathBuf::from(".blossom"),
            http_timeout_secs: 30,
            telegram_init_data: Some(SecretString::from("query_id=abc&hash=123")),
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("query_id"));
    }
}
