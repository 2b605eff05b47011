//! Wire types shared by every endpoint.

use serde::{Deserialize, Serialize};

/// Error body the API returns alongside non-success statuses.
///
/// All fields are optional: proxies and framework defaults often answer with
/// a partial body or plain text instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

impl ApiErrorBody {
    /// Parse `raw` as an error body, falling back to treating it as the message.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match serde_json::from_str::<Self>(trimmed) {
            Ok(body) => body,
            Err(_) if trimmed.is_empty() => Self::default(),
            Err(_) => Self { message: Some(trimmed.to_owned()), ..Self::default() },
        }
    }

    /// Best human-readable message, or `fallback` when the body carried none.
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message.to_owned(),
            _ => fallback.to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
