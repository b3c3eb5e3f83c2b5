//! Disconnect command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;

pub async fn execute(ctx: &CliContext) -> Result<()> {
    ctx.connection().disconnect().await;
    println!("Disconnected. The saved server has been forgotten.");
    Ok(())
}
