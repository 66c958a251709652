//! Tracing initialisation.
//!
//! Library code only emits `tracing` events; hosts call [`init_tracing`]
//! once at startup to get a formatted subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "TERMSYNC_LOG";

/// Install a global fmt subscriber filtered by `TERMSYNC_LOG` (default `info`).
///
/// Safe to call more than once: later calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
