//! Conversations command handler.

use anyhow::Result;
use ohlink_core::ConversationListState;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::conversation_row;

/// List the conversations on the saved server.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    ctx.require_session().await?;

    let mut state = ConversationListState::new();
    ctx.conversations()
        .refresh_conversations(&mut state)
        .await
        .map_err(CliError::from)?;

    if state.conversations.is_empty() {
        println!("No conversations.");
        return Ok(());
    }

    for conversation in &state.conversations {
        println!("{}", conversation_row(conversation));
    }
    println!();
    println!("{} conversation(s)", state.conversations.len());
    Ok(())
}
