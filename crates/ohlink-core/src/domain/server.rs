//! Server endpoint configuration and URL normalization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scheme prepended to user input that names no scheme.
const DEFAULT_SCHEME: &str = "http://";

/// The single active backend endpoint.
///
/// Created after a successful connection test and replaced wholesale on
/// reconnect. Nothing mutates a config in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Normalized base URL (see [`normalize_server_url`]).
    pub url: String,
    /// Optional bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ServerConfig {
    /// Create a config without a token.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
        }
    }

    /// Attach an optional bearer token. Blank tokens are treated as absent.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}

/// Errors produced while normalizing a user-supplied server URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    /// Input was empty or whitespace only.
    #[error("Server URL is empty")]
    Empty,
}

/// Normalize a server URL typed by the user.
///
/// Trims surrounding whitespace, strips exactly one trailing slash and
/// prepends `http://` when neither `http://` nor `https://` is present.
/// The returned value is what gets probed, stored and shown back.
///
/// ```
/// use ohlink_core::normalize_server_url;
///
/// assert_eq!(normalize_server_url("test-server.com").unwrap(), "http://test-server.com");
/// assert_eq!(normalize_server_url("https://x.com/").unwrap(), "https://x.com");
/// ```
pub fn normalize_server_url(raw: &str) -> Result<String, UrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let without_slash = trimmed.strip_suffix('/').unwrap_or(trimmed);

    if has_http_scheme(without_slash) {
        Ok(without_slash.to_string())
    } else {
        Ok(format!("{DEFAULT_SCHEME}{without_slash}"))
    }
}

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
