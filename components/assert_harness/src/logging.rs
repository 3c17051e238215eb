//! Logging setup.
//!
//! The harness reports progress through `tracing` events; hosts that want
//! to see them on stderr call [`init`] once.

use std::error::Error;
use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
///
/// Fails if a global subscriber is already set.
pub fn try_init() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
}

/// Like [`try_init`], but later calls are ignored.
pub fn init() {
    let _ = try_init();
}
