//! Logging setup for the `piecewise` binary.
//!
//! Logs go to stderr through a `tracing-subscriber` fmt layer so that
//! stdout stays free for progress lines and `--json` reports. `RUST_LOG`
//! wins over the configured level when it is set.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Call once, before any events are emitted.
///
/// A second call is ignored rather than panicking.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
