//! Structured logging with environment variable configuration.
//!
//! Logs go to stderr so stdout carries nothing but parsed trees. Records the
//! parser library emits through the `log` facade are forwarded into the same
//! subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

fn filter_from_config(config: &CliConfig) -> EnvFilter {
    EnvFilter::new(config.log_level.as_filter_str())
}

/// Initialise the logging subsystem based on configuration.
///
/// Log level precedence (highest to lowest):
///
/// 1. CLI `--log-level` (parsed into `config.log_level`)
/// 2. `SPDX_EXPR_LOG_LEVEL` (parsed into `config.log_level`)
/// 3. Default configuration value
///
/// If a global subscriber is already set the call is a no-op; the first
/// subscriber wins.
pub fn init_logging(config: &CliConfig) {
    let filter = filter_from_config(config);

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    // Fails only when a subscriber or `log` bridge is already installed.
    let _ = result;
}
