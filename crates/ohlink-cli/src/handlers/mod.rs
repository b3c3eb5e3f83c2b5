//! Command handlers that delegate to the core services.
//!
//! Handlers follow the pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Restore the saved session when the command needs data
//!   2. Call `ConnectionManager` or `ConversationService`
//!   3. Format output for the terminal

pub mod connect;
pub mod conversations;
pub mod disconnect;
pub mod messages;
pub mod send;
pub mod status;
