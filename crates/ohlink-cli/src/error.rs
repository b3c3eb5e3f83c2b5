//! CLI-specific error types and mappings.
//!
//! Maps core errors to exit codes and user-facing messages.

use ohlink_core::{ApiError, ConnectError, SessionStoreError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// No saved session to run a data command against.
    #[error("Not connected. Run 'ohlink connect <url>' first.")]
    NotConnected,

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The server did not answer the probe.
    #[error("{0}")]
    Unreachable(String),

    /// The server answered with an error or an unexpected body.
    #[error("Server error: {0}")]
    Remote(String),

    /// Session file could not be read or written.
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Anything else from the core.
    #[error("{0}")]
    Core(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unreachable(_) => 69, // EX_UNAVAILABLE
            Self::Io(_) => 74,          // EX_IOERR
            Self::Remote(_) => 76,      // EX_PROTOCOL
            Self::NotConnected | Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotInitialized => Self::NotConnected,
            ApiError::InvalidArgument { .. } => Self::Arguments(err.to_string()),
            ApiError::Fetch(_) | ApiError::Send(_) | ApiError::UnexpectedFormat { .. } => {
                Self::Remote(err.user_message())
            }
            ApiError::InvalidUrl { message } => Self::Config(message),
        }
    }
}

impl From<ConnectError> for CliError {
    fn from(err: ConnectError) -> Self {
        match err {
            ConnectError::InvalidUrl(e) => Self::Arguments(e.to_string()),
            ConnectError::Unreachable { .. } => Self::Unreachable(err.to_string()),
            ConnectError::Client(api) => api.into(),
            ConnectError::Store(store) => store.into(),
            ConnectError::Superseded => Self::Core(err.to_string()),
        }
    }
}

impl From<SessionStoreError> for CliError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::NoLocation => Self::Config(err.to_string()),
            SessionStoreError::Io(_) | SessionStoreError::Corrupt(_) => Self::Io(err.to_string()),
        }
    }
}
