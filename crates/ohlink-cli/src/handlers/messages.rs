//! Messages command handler.

use anyhow::Result;
use ohlink_core::MessageList;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::message_line;

/// Print a conversation's messages, oldest first.
pub async fn execute(ctx: &CliContext, conversation_id: &str) -> Result<()> {
    ctx.require_session().await?;

    let mut list = MessageList::new();
    ctx.conversations()
        .refresh_messages(&mut list, conversation_id)
        .await
        .map_err(CliError::from)?;

    if list.is_empty() {
        println!("No messages in {conversation_id}.");
        return Ok(());
    }

    for message in list.messages() {
        println!("{}", message_line(message));
    }
    Ok(())
}
