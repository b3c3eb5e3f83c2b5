//! Status command handler.
//!
//! Reconnects to the saved server (if any) and reports the resulting
//! session. An unreachable server is reported, not treated as a failure.

use anyhow::Result;
use ohlink_core::{ConnectError, SessionPhase};

use crate::bootstrap::CliContext;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, json: bool) -> Result<()> {
    match ctx.connection().restore(ctx.token()).await {
        Ok(_) | Err(ConnectError::Unreachable { .. }) => {}
        Err(e) => return Err(CliError::from(e).into()),
    }

    let session = ctx.connection().session().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    match session.phase() {
        SessionPhase::Connected => {
            println!("Connected to {}", session.server_url().unwrap_or_default());
        }
        SessionPhase::Connecting => println!("Connecting..."),
        SessionPhase::Idle => match session.error.as_deref() {
            Some(error) => println!("Not connected: {error}"),
            None => println!("Not connected."),
        },
    }
    Ok(())
}
