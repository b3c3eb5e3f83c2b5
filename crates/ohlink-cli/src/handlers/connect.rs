//! Connect command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Probe `url`, install a client for it and save it for later commands.
pub async fn execute(ctx: &CliContext, url: &str) -> Result<()> {
    let config = ctx
        .connection()
        .connect(url, ctx.token())
        .await
        .map_err(CliError::from)?;

    println!("Connected to {}", config.url);
    if config.token.is_none() {
        println!("No token set; requests are unauthenticated.");
    }
    Ok(())
}
