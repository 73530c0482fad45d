//! Backup command (placeholder)

use anyhow::Result;
use clap::Parser;

use logbook_config::Environment;

/// Arguments for the backup command
#[derive(Parser, Debug)]
pub struct BackupArgs {
    /// Environment whose database to back up
    #[arg(long, value_enum, default_value_t = Environment::Prod)]
    pub env: Environment,
}

/// Back up the expense database.
///
/// Declared ahead of its implementation so the surface is stable.
// TODO: shell out to pg_dump with Config::conn_string once the retention
// policy for dumps is decided.
pub fn run_backup(args: BackupArgs) -> Result<()> {
    tracing::warn!(env = %args.env, "backup is not implemented yet");
    Ok(())
}
