//! Logging backend for the host binary.
//!
//! The library logs through the `log` facade only.  This installs a
//! `tracing-subscriber` formatter that also picks up `log` records.
//! Output goes to stderr; stdout carries the host protocol.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging.
///
/// Level is taken from `RUST_LOG`, defaulting to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}
