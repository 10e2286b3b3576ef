//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "LAPSE_LOG";

/// Initialize the lapse tracing/logging system.
///
/// Reads `LAPSE_LOG` for per-subsystem log levels, e.g.
/// `LAPSE_LOG=lapse_analysis::engine=debug,lapse_analysis::semantic=warn`.
/// Falls back to `lapse=info` if unset or invalid. Safe to call repeatedly.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("lapse=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
