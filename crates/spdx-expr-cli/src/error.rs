//! Error types for the command line front end.

use thiserror::Error;

/// Failures that stop the tool before or while it writes output.
///
/// Parse failures of individual expressions are not errors at this level;
/// they are logged and counted so the remaining inputs still get processed.
#[derive(Debug, Error)]
pub enum CliError {
    /// An invalid configuration value was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tree could not be rendered as JSON.
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
