//! Check that the configured database accepts connections

use anyhow::{Context, Result};
use clap::Parser;

use enrollctl_server::db::connect;

use crate::config::DatabaseArgs;

#[derive(Parser, Debug)]
pub struct PingArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_ping(args: PingArgs) -> Result<()> {
    let retry = args.database.retry_duration();
    let pool = connect(&args.database.connection_url(), 1, retry)
        .await
        .with_context(|| format!("{} unreachable within {:?}", args.database.target(), retry))?;

    println!("{} is accepting connections", args.database.target());
    pool.close().await;
    Ok(())
}
