//! Send command handler.

use anyhow::Result;
use ohlink_core::MessageList;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::message_line;

/// Send `text` and print the message as the server recorded it.
///
/// The text is checked before reconnecting so blank input never touches
/// the network.
pub async fn execute(ctx: &CliContext, conversation_id: &str, text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(CliError::Arguments("message text must not be empty".to_string()).into());
    }
    ctx.require_session().await?;

    let mut list = MessageList::new();
    let confirmed = ctx
        .conversations()
        .send_with_reconciliation(&mut list, conversation_id, text)
        .await
        .map_err(CliError::from)?;

    println!("{}", message_line(&confirmed));
    Ok(())
}
