//! Logging bootstrap.
//!
//! The engine and harness emit `tracing` events; nothing is printed until a
//! binary installs a subscriber. Output goes to stderr so stdout stays
//! clean for fixture output.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "warn";

/// Install the global fmt subscriber, filtered by `RUST_LOG`.
///
/// Returns `false` if a global subscriber was already installed, which makes
/// the call safe to repeat from tests.
pub fn init_logging() -> bool {
    init_logging_with(DEFAULT_FILTER)
}

/// Like [`init_logging`] with an explicit fallback filter, e.g.
/// `"pathstep_search=debug"`.
pub fn init_logging_with(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
