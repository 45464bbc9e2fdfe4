//! Parses a batch of expressions and writes their trees.

use std::io::{BufRead, Write};

use tracing::{debug, error};

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::write_expression;

/// Outcome of processing a batch of expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Expressions parsed and written.
    pub parsed: usize,
    /// Expressions rejected by the parser.
    pub failed: usize,
}

/// Parse every input and write each tree to `writer`.
///
/// Inputs that fail to parse are logged with their byte offset and counted;
/// processing continues with the next input.
///
/// # Errors
///
/// Returns an error if writing output fails.
pub fn run<I, S>(
    config: &CliConfig,
    inputs: I,
    writer: &mut dyn Write,
) -> Result<RunSummary, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parser = config.parser();
    let mut summary = RunSummary::default();
    for input in inputs {
        let input = input.as_ref();
        match parser.parse(input) {
            Ok(expr) => {
                debug!(input, depth = expr.depth(), "parsed expression");
                write_expression(writer, &expr, config.format)?;
                summary.parsed += 1;
            }
            Err(err) => {
                error!(input, offset = err.offset(), dialect = %config.dialect, "{err}");
                summary.failed += 1;
            }
        }
    }
    Ok(summary)
}

/// Read one expression per non-blank line.
///
/// # Errors
///
/// Returns an error if the reader fails.
pub fn read_inputs(reader: impl BufRead) -> Result<Vec<String>, CliError> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            inputs.push(line);
        }
    }
    Ok(inputs)
}
