//! Error types for backend port operations.

use thiserror::Error;

/// How a single HTTP request failed.
///
/// Keeps "the server answered with an error" apart from "nothing came back".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    /// The server responded with a non-2xx status.
    #[error("server responded with status {status}{}", format_server_message(.message.as_deref()))]
    Status {
        /// HTTP status code
        status: u16,
        /// `message` field from the error body, when the server sent one
        message: Option<String>,
    },

    /// No response was received (connection refused, timeout, DNS).
    #[error("no response received: {message}")]
    NoResponse {
        /// Transport-level description
        message: String,
    },
}

fn format_server_message(message: Option<&str>) -> String {
    message.map_or_else(String::new, |m| format!(": {m}"))
}

impl RequestFailure {
    /// HTTP status, if the server answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NoResponse { .. } => None,
        }
    }
}

/// Errors surfaced by conversation data access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// A data call was made before any client was initialized.
    #[error("API client is not initialized; connect to a server first")]
    NotInitialized,

    /// A required argument was empty.
    #[error("Invalid argument: {field} must not be empty")]
    InvalidArgument {
        /// Name of the offending argument
        field: &'static str,
    },

    /// A read request failed.
    #[error("Failed to fetch: {0}")]
    Fetch(RequestFailure),

    /// A write request failed.
    #[error("Failed to send: {0}")]
    Send(RequestFailure),

    /// The response body did not have the expected shape.
    #[error("Unexpected response format: {message}")]
    UnexpectedFormat {
        /// What did not match
        message: String,
    },

    /// The configured base URL cannot be used to build request URLs.
    #[error("Invalid server URL: {message}")]
    InvalidUrl {
        /// Parser description
        message: String,
    },
}

impl ApiError {
    /// The underlying request failure for fetch/send errors.
    #[must_use]
    pub const fn request_failure(&self) -> Option<&RequestFailure> {
        match self {
            Self::Fetch(failure) | Self::Send(failure) => Some(failure),
            _ => None,
        }
    }

    /// Short message suitable for inline UI feedback.
    ///
    /// Prefers the server-provided message when one was returned.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self.request_failure() {
            Some(RequestFailure::Status {
                message: Some(message),
                ..
            }) => message.clone(),
            _ => self.to_string(),
        }
    }
}

/// Result type alias for port operations.
pub type ApiResult<T> = Result<T, ApiError>;
