//! Tracing setup: structured logging plus named log events.

pub mod events;

use tracing_subscriber::EnvFilter;

use docent_core::config::ObservabilityConfig;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "DOCENT_LOG";

/// Install the global subscriber.
///
/// `DOCENT_LOG` wins over the configured level. JSON output when
/// `json_logs` is set. Returns `false` if a subscriber was already
/// installed, which makes repeated calls from tests harmless.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    }
}

/// Install a subscriber with an explicit filter string (tests, embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}
