//! CLI entry point.
//!
//! Parses arguments, installs logging, bootstraps the context and routes
//! the command to its handler.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ohlink_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = bootstrap(CliConfig {
        state_file: cli.state_file,
        token: cli.token,
        ..CliConfig::default()
    })?;

    match command {
        Commands::Connect { url } => handlers::connect::execute(&ctx, &url).await?,
        Commands::Disconnect => handlers::disconnect::execute(&ctx).await?,
        Commands::Status { json } => handlers::status::execute(&ctx, json).await?,
        Commands::Conversations => handlers::conversations::execute(&ctx).await?,
        Commands::Messages { conversation_id } => {
            handlers::messages::execute(&ctx, &conversation_id).await?;
        }
        Commands::Send {
            conversation_id,
            text,
        } => {
            handlers::send::execute(&ctx, &conversation_id, &text.join(" ")).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before clap reads `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(e.downcast_ref::<CliError>().map_or(1, CliError::exit_code))
        }
    }
}
