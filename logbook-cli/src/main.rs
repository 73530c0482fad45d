//! logbook CLI - travel expense tracking backend
//!
//! Entry point for the logbook command-line tool:
//! - `serve` runs the HTTP server with graceful shutdown
//! - `backup` is a declared placeholder for database backups

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "logbook",
    version,
    about = "Track travel expenses and stays per city"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    #[command(visible_alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Back up the expense database (not implemented yet)
    #[command(visible_alias = "b")]
    Backup(commands::backup::BackupArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::Backup(args) => commands::backup::run_backup(args)?,
    }
    Ok(())
}
