//! Plain state containers driven by explicit transitions.
//!
//! None of these types do I/O; services call the transitions around their
//! network calls.

pub mod conversation_list;
pub mod message_list;
pub mod session;

pub use conversation_list::{ConversationListState, FetchStatus};
pub use message_list::{MessageList, ProvisionalId};
pub use session::{SessionPhase, SessionState};
