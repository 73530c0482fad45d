//! Serve command
//!
//! Startup order is fixed: load config, acquire the pool through the
//! guard (one attempt per process start), then hand the pool to the
//! orchestrator. SIGINT and SIGTERM both cancel the shutdown token.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use logbook_config::{Config, Environment};
use logbook_server::http::{run_server, ServerConfig};
use logbook_server::ConnectionGuard;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Environment whose config document to load
    #[arg(long, value_enum, default_value_t = Environment::Prod)]
    pub env: Environment,

    /// Port to listen on
    #[arg(long, short, default_value_t = 8080)]
    pub port: u16,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config =
        Config::load(args.env).with_context(|| format!("load {} config", args.env))?;

    let guard = ConnectionGuard::new();
    let pool = guard
        .acquire(&config)
        .await
        .context("initialize database pool")?;

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("shutdown signal received");
        signal.cancel();
    });

    let server_config = ServerConfig {
        bind_addr: SocketAddr::from(([0, 0, 0, 0], args.port)),
        ..ServerConfig::default()
    };

    run_server(pool, server_config, shutdown)
        .await
        .context("server error")?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, starting shutdown");
        }
    }
}
