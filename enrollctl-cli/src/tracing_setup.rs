//! Tracing setup for the enrollctl CLI
//!
//! Usage:
//!   enrollctl --debug serve                # Debug logging with targets
//!   LOG_LEVEL=warn enrollctl serve         # Coarse level
//!   RUST_LOG=enrollctl_server=debug ...    # Fine-grained control, wins over both

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Force debug level and show targets
    pub debug: bool,
    /// Level used when RUST_LOG is not set
    pub level: String,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
