//! HTTP server command
//!
//! Connects to the database (with startup retry), optionally bootstraps the
//! tables, then serves the course and person API until shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use enrollctl_server::db::{close_pool, connect, ensure_schema};
use enrollctl_server::http::{run_server, ServerConfig};

use crate::config::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "HTTP_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Seconds in-flight requests may drain after a shutdown signal
    #[arg(long, env = "HTTP_SHUTDOWN_DURATION", default_value_t = 10)]
    pub shutdown_timeout: u64,

    /// Milliseconds allowed for handling one request
    #[arg(long, env = "HTTP_REQUEST_TIMEOUT_MS", default_value_t = 500)]
    pub request_timeout_ms: u64,

    /// Create missing tables before serving
    #[arg(long)]
    pub init_schema: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!(target_db = %args.database.target(), "Starting enrollctl server on {}", args.bind);

    let pool = connect(
        &args.database.connection_url(),
        args.database.max_connections,
        args.database.retry_duration(),
    )
    .await
    .context("Failed to connect to database")?;

    if args.init_schema {
        ensure_schema(&pool)
            .await
            .context("Failed to create database schema")?;
    }

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_millis(args.request_timeout_ms),
        shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
    };

    let drain = config.shutdown_timeout;

    // Run server (blocks until shutdown)
    let result = run_server(pool.clone(), config).await;
    if close_pool(&pool, drain).await {
        tracing::info!("Database pool closed");
    }

    result.context("Server error")
}
