//! Internal error types for HTTP operations.
//!
//! These errors are internal to `ohlink-http` and are mapped to core port
//! errors at the boundary.

use thiserror::Error;

/// Result type alias for HTTP operations.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors related to talking to the conversation server.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-2xx status.
    #[error("Request to {url} failed with status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// `message` from the error body, if any
        message: Option<String>,
    },

    /// Transport failure before any response arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No response arrived (reported by backends that do not surface a
    /// `reqwest::Error`).
    #[error("No response from {url}: {message}")]
    NoResponse {
        /// The URL that was requested
        url: String,
        /// Transport-level description
        message: String,
    },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Response decoded but a field had an unusable value.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Client could not be configured (e.g. token not valid as a header).
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}
