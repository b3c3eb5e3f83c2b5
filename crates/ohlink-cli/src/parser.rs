//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for talking to a conversation server.
///
/// Global options apply to every subcommand. The session (last connected
/// server) is kept in a small state file between invocations.
#[derive(Parser)]
#[command(name = "ohlink")]
#[command(about = "Connect to a conversation server and read or send messages")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Where the session file lives (defaults to the user config directory)
    #[arg(long = "state-file", env = "OHLINK_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Bearer token sent with every data request
    #[arg(long = "token", env = "OHLINK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
