//! Tool configuration parsed from environment variables.
//!
//! Every setting can be given through an environment variable prefixed with
//! `SPDX_EXPR_` and overridden by the matching command line flag.

use std::env;
use std::str::FromStr;

use spdx_expr::{DEFAULT_MAX_DEPTH, Dialect, Parser};

use crate::error::CliError;
use crate::output::OutputFormat;

/// Log level enumeration matching tracing crate levels.
///
/// Defaults to `Warn` so parse output on stdout is not drowned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Most verbose logging, includes every parse.
    Trace,
    /// Includes how malformed input was recovered.
    Debug,
    /// Standard informational messages.
    Info,
    /// Warning messages for potentially problematic situations.
    #[default]
    Warn,
    /// Error messages for failures.
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown log level '{s}', expected one of: trace, debug, info, warn, error"
            ))),
        }
    }
}

impl LogLevel {
    /// Convert to a tracing filter directive string.
    #[must_use]
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Configuration for one run of the tool.
///
/// # Environment Variables
///
/// - `SPDX_EXPR_LOG_LEVEL`: trace, debug, info, warn or error
/// - `SPDX_EXPR_DIALECT`: lenient, strict or spdx
/// - `SPDX_EXPR_MAX_DEPTH`: maximum parenthesis nesting accepted by the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Log level for stderr diagnostics.
    pub log_level: LogLevel,
    /// Grammar and error policy used for every input.
    pub dialect: Dialect,
    /// Maximum parenthesis nesting.
    pub max_depth: usize,
    /// How parsed trees are printed.
    pub format: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            dialect: Dialect::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Falls back to defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidConfig` if an environment variable contains
    /// an invalid value.
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, CliError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let log_level = match lookup("SPDX_EXPR_LOG_LEVEL") {
            Some(val) => val.parse()?,
            None => defaults.log_level,
        };

        let dialect = match lookup("SPDX_EXPR_DIALECT") {
            Some(val) => val
                .parse()
                .map_err(|err| CliError::InvalidConfig(format!("{err}")))?,
            None => defaults.dialect,
        };

        let max_depth = match lookup("SPDX_EXPR_MAX_DEPTH") {
            Some(val) => val.parse().map_err(|_| {
                CliError::InvalidConfig(format!(
                    "invalid max depth '{val}', expected a positive integer"
                ))
            })?,
            None => defaults.max_depth,
        };

        Ok(Self {
            log_level,
            dialect,
            max_depth,
            format: defaults.format,
        })
    }

    /// Apply optional overrides to an existing configuration.
    ///
    /// Command line flags take precedence over environment-based values.
    #[must_use]
    pub fn apply_overrides(
        mut self,
        log_level: Option<LogLevel>,
        dialect: Option<Dialect>,
        max_depth: Option<usize>,
        format: Option<OutputFormat>,
    ) -> Self {
        if let Some(level) = log_level {
            self.log_level = level;
        }
        if let Some(dialect) = dialect {
            self.dialect = dialect;
        }
        if let Some(depth) = max_depth {
            self.max_depth = depth;
        }
        if let Some(format) = format {
            self.format = format;
        }
        self
    }

    /// Create a new configuration with the specified log level.
    #[must_use]
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Build the expression parser this configuration describes.
    #[must_use]
    pub fn parser(&self) -> Parser {
        Parser::new(self.dialect).with_max_depth(self.max_depth)
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests require explicit panic messages for debugging failures"
)]
mod tests {
    use std::collections::HashMap;

    use rstest::rstest;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[rstest]
    #[case("trace", LogLevel::Trace)]
    #[case("Debug", LogLevel::Debug)]
    #[case("INFO", LogLevel::Info)]
    #[case("warning", LogLevel::Warn)]
    #[case("error", LogLevel::Error)]
    fn log_level_parses_case_insensitively(#[case] input: &str, #[case] expected: LogLevel) {
        assert_eq!(input.parse::<LogLevel>().ok(), Some(expected));
    }

    #[test]
    fn log_level_rejects_invalid_values() {
        let result = "loud".parse::<LogLevel>();
        assert!(result.unwrap_err().to_string().contains("unknown log level"));
    }

    #[test]
    fn defaults_apply_without_environment() {
        let config = CliConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.dialect, Dialect::Lenient);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn reads_every_variable() {
        let config = CliConfig::from_lookup(lookup_from(&[
            ("SPDX_EXPR_LOG_LEVEL", "debug"),
            ("SPDX_EXPR_DIALECT", "spdx"),
            ("SPDX_EXPR_MAX_DEPTH", "12"),
        ]))
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.dialect, Dialect::Spdx);
        assert_eq!(config.max_depth, 12);
    }

    #[rstest]
    #[case("SPDX_EXPR_LOG_LEVEL", "loud", "unknown log level")]
    #[case("SPDX_EXPR_DIALECT", "loose", "unknown dialect")]
    #[case("SPDX_EXPR_MAX_DEPTH", "-1", "invalid max depth")]
    fn rejects_invalid_variables(#[case] key: &str, #[case] value: &str, #[case] message: &str) {
        let err = CliConfig::from_lookup(lookup_from(&[(key, value)])).unwrap_err();
        assert!(
            err.to_string().contains(message),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn overrides_take_precedence() {
        let config = CliConfig::default().apply_overrides(
            Some(LogLevel::Error),
            Some(Dialect::Strict),
            Some(3),
            Some(OutputFormat::Json),
        );
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.dialect, Dialect::Strict);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.format, OutputFormat::Json);

        let unchanged = CliConfig::default().apply_overrides(None, None, None, None);
        assert_eq!(unchanged, CliConfig::default());
    }

    #[test]
    fn builds_matching_parser() {
        let config = CliConfig::default().apply_overrides(None, Some(Dialect::Spdx), Some(9), None);
        let parser = config.parser();
        assert_eq!(parser.dialect(), Dialect::Spdx);
        assert_eq!(parser.max_depth(), 9);
    }
}
