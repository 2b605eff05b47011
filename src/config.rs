//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ApiError;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_CACHE_STALE_MS: u64 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for ClientTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL, always ending in exactly one `/` so relative endpoint
    /// paths (`auth/login`) join underneath it.
    pub base_url: String,
    pub timeouts: ClientTimeouts,
    /// Age after which a cached query result is refetched on its next read.
    pub cache_stale_time: Duration,
    /// Where the CLI persists the session token between runs.
    pub token_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Config with default timeouts and stale time for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            timeouts: ClientTimeouts::default(),
            cache_stale_time: Duration::from_millis(DEFAULT_CACHE_STALE_MS),
            token_file: None,
        })
    }

    /// Build typed client config from environment variables.
    ///
    /// Required:
    /// - `ACCOUNT_API_URL`
    ///
    /// Optional:
    /// - `ACCOUNT_REQUEST_TIMEOUT_SECS`: default 10
    /// - `ACCOUNT_CONNECT_TIMEOUT_SECS`: default 5
    /// - `ACCOUNT_CACHE_STALE_MS`: default 5000
    /// - `ACCOUNT_TOKEN_FILE`: no default
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is missing or malformed, or
    /// a numeric variable is set to something that is not a number.
    pub fn from_env() -> Result<Self, ApiError> {
        let raw_url = std::env::var("ACCOUNT_API_URL")
            .map_err(|_| ApiError::Config("ACCOUNT_API_URL not set".into()))?;
        Self::from_env_with_base_url(&raw_url)
    }

    /// Like [`ClientConfig::from_env`] but with the base URL supplied by the
    /// caller (e.g. a command-line flag) instead of `ACCOUNT_API_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Config`] if the base URL is malformed or a numeric
    /// variable is not a number.
    pub fn from_env_with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let mut config = Self::new(base_url)?;

        config.timeouts = ClientTimeouts {
            request_secs: env_parse_u64("ACCOUNT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("ACCOUNT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        config.cache_stale_time =
            Duration::from_millis(env_parse_u64("ACCOUNT_CACHE_STALE_MS", DEFAULT_CACHE_STALE_MS)?);
        config.token_file = match std::env::var("ACCOUNT_TOKEN_FILE") {
            Ok(path) if !path.trim().is_empty() => Some(PathBuf::from(path)),
            _ => None,
        };

        Ok(config)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.request_secs)
    }

    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.connect_secs)
    }
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, ApiError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ApiError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| ApiError::Config(format!("invalid base URL '{trimmed}': {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::Config(format!("unsupported base URL scheme '{}'", url.scheme())));
    }
    Ok(format!("{}/", trimmed.trim_end_matches('/')))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
