//! Error taxonomy for account API calls.
//!
//! ERROR HANDLING
//! ==============
//! Every failure surfaces to the caller as an [`ApiError`]. The only local
//! recovery anywhere in the crate is the token clearing performed by the HTTP
//! client on a 401; nothing retries, and no operation substitutes a fallback
//! value for a failed request.

use std::fmt;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Client-side validation failures, collected before any request is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push(FieldError { field, message: message.into() });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Turn the collected errors into a result: `Ok(())` when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when at least one field was rejected.
    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() { Ok(()) } else { Err(ApiError::Validation(self)) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .fields
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&rendered)
    }
}

/// Errors produced by the HTTP client and the account operations built on it.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect, timeout, IO).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered 401. The session token has already been cleared.
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// The server answered with any other non-success status.
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String, code: Option<String> },

    /// The response body was not the JSON shape the endpoint promises.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// Input was rejected locally; no request was sent.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Client configuration is unusable (bad base URL, bad env value, client build).
    #[error("config error: {0}")]
    Config(String),
}

impl ApiError {
    /// Stable machine-readable code for the error class.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Unauthorized { .. } => "E_UNAUTHORIZED",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
            Self::Validation(_) => "E_VALIDATION",
            Self::Config(_) => "E_CONFIG",
        }
    }

    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Informational only: nothing in this crate retries.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }

    /// HTTP status carried by the error, when the server produced one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Decode(error.to_string())
        } else if error.is_builder() {
            Self::Config(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
