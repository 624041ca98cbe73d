//! Diagnostic logging via `tracing`.
//!
//! Logs go to stderr so they never mix with translation output on stdout.
//! `LU_LOG` accepts `EnvFilter` directives (e.g. `LU_LOG=lu_cli=trace`).

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LU_LOG";

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| format!("{}={default_level}", env!("CARGO_CRATE_NAME")).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
