//! Helpers for rendering parsed trees.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use spdx_expr::Expression;

use crate::error::CliError;

/// How each parsed tree is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One node per line, children indented below their parent.
    #[default]
    Tree,
    /// Rust `Debug` rendering of the tree.
    Debug,
    /// One compact JSON document per line.
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tree" => Ok(Self::Tree),
            "debug" => Ok(Self::Debug),
            "json" => Ok(Self::Json),
            _ => Err(CliError::InvalidConfig(format!(
                "unknown output format '{s}', expected one of: tree, debug, json"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tree => "tree",
            Self::Debug => "debug",
            Self::Json => "json",
        })
    }
}

/// Write `expr` in the requested format, followed by a newline.
///
/// # Errors
///
/// Returns an error if writing fails or the tree cannot be serialised.
pub fn write_expression(
    writer: &mut dyn Write,
    expr: &Expression,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Tree => write_tree(writer, expr)?,
        OutputFormat::Debug => writeln!(writer, "{expr:#?}")?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, expr)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

fn write_tree(writer: &mut dyn Write, expr: &Expression) -> Result<(), CliError> {
    let mut pending = vec![(expr, 0_usize)];
    while let Some((node, level)) = pending.pop() {
        let indent = "  ".repeat(level);
        match node.as_identifier() {
            Some(name) => writeln!(writer, "{indent}{} {name}", node.kind())?,
            None => writeln!(writer, "{indent}{}", node.kind())?,
        }
        pending.extend(node.children().into_iter().rev().map(|child| (child, level + 1)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn render(expr: &Expression, format: OutputFormat) -> String {
        let mut buffer = Vec::new();
        write_expression(&mut buffer, expr, format)
            .unwrap_or_else(|err| panic!("render expression: {err}"));
        String::from_utf8(buffer).unwrap_or_else(|err| panic!("utf8 output: {err}"))
    }

    fn sample() -> Expression {
        Expression::conjunction(
            Expression::identifier("MIT"),
            Expression::group(Expression::exception(
                Expression::identifier("GPL-2.0-only"),
                Expression::identifier("Classpath-exception-2.0"),
            )),
        )
    }

    #[test]
    fn renders_indented_tree() {
        assert_eq!(
            render(&sample(), OutputFormat::Tree),
            "conjunction\n  identifier MIT\n  group\n    exception\n      \
             identifier GPL-2.0-only\n      identifier Classpath-exception-2.0\n"
        );
    }

    #[test]
    fn renders_json_line() {
        assert_eq!(
            render(&Expression::identifier("MIT"), OutputFormat::Json),
            "{\"identifier\":\"MIT\"}\n"
        );
    }

    #[test]
    fn renders_debug() {
        let output = render(&Expression::identifier("MIT"), OutputFormat::Debug);
        assert!(output.contains("Identifier("), "unexpected output: {output}");
    }

    #[rstest]
    #[case("tree", OutputFormat::Tree)]
    #[case("DEBUG", OutputFormat::Debug)]
    #[case("Json", OutputFormat::Json)]
    fn parses_format_names(#[case] input: &str, #[case] expected: OutputFormat) {
        assert_eq!(input.parse::<OutputFormat>().ok(), Some(expected));
        assert_eq!(expected.to_string().parse::<OutputFormat>().ok(), Some(expected));
    }

    #[test]
    fn rejects_unknown_format() {
        let Err(err) = "yaml".parse::<OutputFormat>() else {
            panic!("expected format error");
        };
        assert!(err.to_string().contains("unknown output format 'yaml'"));
    }
}
