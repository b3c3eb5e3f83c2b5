//! Port definitions.
//!
//! Traits implemented by adapters, plus the error types that cross the
//! boundary. Implementation-specific errors (HTTP, JSON) are mapped into
//! [`ApiError`] by the adapter.

mod backend;
mod error;
mod session_store;

pub use backend::{BackendConnector, ConversationApi};
pub use error::{ApiError, ApiResult, RequestFailure};
pub use session_store::{PersistedSession, SessionStore, SessionStoreError};
