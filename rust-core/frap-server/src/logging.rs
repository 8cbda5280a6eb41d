//! Tracing subscriber setup.

use crate::config::LoggingSection;
use tracing_subscriber::EnvFilter;

/// Filter from `RUST_LOG`, falling back to the configured level
#[must_use]
pub fn env_filter(logging: &LoggingSection) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

/// Install the global subscriber
///
/// Later calls are no-ops.
pub fn init_tracing(logging: &LoggingSection) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(logging));
    let _ = if logging.json {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
}
