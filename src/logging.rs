//! Logging setup
//!
//! Installs a tracing subscriber writing compact lines to stderr. The level
//! comes from `RUST_LOG` when set, otherwise from the configured default.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{ChklstError, ChklstResult};

/// Initialize the global tracing subscriber
///
/// Fails if the level cannot be parsed or a subscriber is already installed.
pub fn init(default_level: &str) -> ChklstResult<()> {
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| ChklstError::Config(format!("Invalid log level '{}': {}", default_level, e)))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ChklstError::Config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_init() {
        // Only one subscriber per process; a second call must fail cleanly
        let _ = init("debug");
        assert!(init("info").is_err());

        tracing::info!("This is an info message");
    }
}
