//! Logging setup
//!
//! Logs go to stderr so listings on stdout stay pipeable. `RUST_LOG`
//! overrides the level chosen from the command-line flags.

use miette::{IntoDiagnostic, Result};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Pick the default filter directive from the global flags
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if verbose {
        "stockroom=debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    }
}

/// Install the global tracing subscriber
pub fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .without_time();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(true, false), "stockroom=debug");
        assert_eq!(default_level(true, true), "stockroom=debug");
        assert_eq!(default_level(false, true), "error");
        assert_eq!(default_level(false, false), "warn");
    }
}
