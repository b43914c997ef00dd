//! Logging setup emitting JSON lines through `tracing`.
//!
//! Events across the crate carry the same field names (`ev`, `code`, `dur_ms`) so
//! downstream tooling can filter on them.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the JSON subscriber on stderr. Safe to call more than once; only the
/// first call wins.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init();
}
