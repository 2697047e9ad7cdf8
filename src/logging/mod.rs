//! Tracing subscriber setup for the binary
//!
//! `RUST_LOG` wins when set; otherwise `--verbose` picks `debug` for this
//! crate and the default is `info`.

use crate::error::{Error, Result};
use tracing_subscriber::EnvFilter;

const CRATE_TARGET: &str = "roulette_engine";

/// Filter from `RUST_LOG`, falling back to the verbosity flag
pub fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose))
}

fn default_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    EnvFilter::new(format!("warn,{}={}", CRATE_TARGET, level))
}

/// Install the global subscriber; fails if one is already set
pub fn init_logging(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_target(verbose)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        let quiet = default_filter(false).to_string();
        assert!(quiet.contains("roulette_engine=info"));
        assert!(quiet.contains("warn"));
        assert!(default_filter(true).to_string().contains("roulette_engine=debug"));
    }
}
