//! enrollctl CLI - course and person enrollment service
//!
//! - `serve`: run the HTTP API
//! - `ping`: check that the database accepts connections

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "enrollctl",
    author,
    version,
    about = "HTTP service for courses, persons, and their enrollments"
)]
struct Cli {
    /// Debug logging with module targets
    #[arg(long, global = true)]
    debug: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    Serve(commands::serve::ServeArgs),

    /// Wait for the database to accept connections, then exit
    Ping(commands::ping::PingArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env values feed the clap env fallbacks; a missing file is fine
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        level: cli.log_level,
    })?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Ping(args) => commands::run_ping(args).await?,
    }
    Ok(())
}
