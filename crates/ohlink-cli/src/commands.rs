//! Available subcommands.

use clap::Subcommand;

/// Operations against the conversation server.
///
/// Data commands reconnect to the server saved by the last successful
/// `connect` before doing anything.
#[derive(Subcommand)]
pub enum Commands {
    /// Connect to a server and remember it for later commands
    Connect {
        /// Server address, e.g. "localhost:3000" or "https://oh.example.com"
        url: String,
    },

    /// Forget the saved server
    Disconnect,

    /// Show whether a saved server is reachable
    Status {
        /// Print the session as JSON
        #[arg(long)]
        json: bool,
    },

    /// List conversations on the server
    Conversations,

    /// Show the messages of a conversation, oldest first
    Messages {
        /// Conversation ID
        conversation_id: String,
    },

    /// Send a message to a conversation
    Send {
        /// Conversation ID
        conversation_id: String,
        /// Message text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
}
