//! Logging setup
//!
//! Console logging through `tracing-subscriber`, filtered by `RUST_LOG`.
//! Logs go to stderr so command output on stdout stays clean.

use std::io;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `default_level` applies when `RUST_LOG` is unset or invalid. Calling this
/// twice is harmless; the second call is ignored.
pub fn init(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}
