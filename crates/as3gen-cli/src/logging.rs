//! stderr logging for the CLI

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` when set, `level` otherwise.
fn filter(level: &str) -> Result<EnvFilter> {
    match std::env::var(EnvFilter::DEFAULT_ENV) {
        Ok(directives) if !directives.is_empty() => parse_filter(&directives),
        _ => parse_filter(level),
    }
}

fn parse_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::builder()
        .parse(directives)
        .with_context(|| format!("Invalid log filter: {directives}"))
}

/// Install the global fmt subscriber writing to stderr.
pub fn init(level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level)?)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {e}"))
}

#[cfg(test)]
#[path = "logging/logging_tests.rs"]
mod logging_tests;
