//! Logging initialization for the CLI.
//!
//! The library only emits `tracing` events. The binary installs a subscriber
//! here: human-readable by default, JSON with `--json-logs`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logging subsystem.
///
/// - `verbose` enables DEBUG, otherwise INFO.
/// - `RUST_LOG` overrides both.
/// - Output goes to stderr; stdout carries command output.
pub fn init(verbose: bool, json_format: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
