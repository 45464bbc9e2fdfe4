//! Parsing entry points and dialect selection.
//!
//! Three dialects share one lexer:
//!
//! - [`Dialect::Lenient`] is best-effort. The right operand of `AND`, `OR`
//!   and `WITH` is the whole remainder of the enclosing scope, so operators
//!   nest to the right with no precedence between them: `A AND B OR C`
//!   becomes `A AND (B OR C)`. Malformed input degrades to whatever tree can
//!   be salvaged.
//! - [`Dialect::Strict`] builds the same trees as the lenient dialect for
//!   well-formed input and reports [`ParseError`]s where the lenient dialect
//!   would have degraded.
//! - [`Dialect::Spdx`] follows the published SPDX grammar: `WITH` binds
//!   tightest, then `AND`, then `OR`, and binary operators associate to the
//!   left.
//!
//! The two right-nested dialects keep open scopes on the heap; the SPDX
//! dialect recurses once per open parenthesis. Every dialect bounds
//! parenthesis nesting with [`Parser::max_depth`]. Operators do not count, so
//! a flat list of any length parses.

mod precedence;
mod scoped;


use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::ast::Expression;
use crate::errors::ParseError;

use self::precedence::PrecedenceParser;
use self::scoped::{ScopeParser, Strictness};

/// Default bound on nested parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Grammar and error policy applied by a [`Parser`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Right-nested operators, malformed input degrades silently.
    #[default]
    Lenient,
    /// Right-nested operators, malformed input is rejected.
    Strict,
    /// SPDX operator precedence, malformed input is rejected.
    Spdx,
}

impl Dialect {
    /// Return the dialect name as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
            Self::Spdx => "spdx",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a dialect name is not recognised.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown dialect '{0}', expected one of: lenient, strict, spdx")]
pub struct DialectParseError(pub String);

impl FromStr for Dialect {
    type Err = DialectParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("lenient") {
            Ok(Self::Lenient)
        } else if trimmed.eq_ignore_ascii_case("strict") {
            Ok(Self::Strict)
        } else if trimmed.eq_ignore_ascii_case("spdx") {
            Ok(Self::Spdx)
        } else {
            Err(DialectParseError(trimmed.to_string()))
        }
    }
}

/// Configurable expression parser.
///
/// A `Parser` holds no per-parse state, so one value can be shared freely
/// between threads and reused for any number of inputs.
///
/// # Examples
///
/// ```
/// use spdx_expr::{Dialect, Expression, Parser};
///
/// let parser = Parser::new(Dialect::Spdx);
/// let expr = parser.parse("MIT AND BSD-2-Clause OR Apache-2.0");
/// assert_eq!(
///     expr,
///     Ok(Expression::disjunction(
///         Expression::conjunction(
///             Expression::identifier("MIT"),
///             Expression::identifier("BSD-2-Clause"),
///         ),
///         Expression::identifier("Apache-2.0"),
///     ))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parser {
    dialect: Dialect,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl Parser {
    /// Create a parser for `dialect` with the default depth limit.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the limit on nested parentheses.
    ///
    /// The SPDX dialect uses one call frame per open parenthesis, so there a
    /// limit far above the default is bounded by the thread's stack size.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// The configured dialect.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// The configured depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse `input` into an expression tree.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::EmptyExpression`] when nothing could be parsed
    /// and [`ParseError::NestingTooDeep`] when the depth limit is exceeded.
    /// The strict and SPDX dialects additionally report malformed input.
    pub fn parse(&self, input: &str) -> Result<Expression, ParseError> {
        log::trace!("parsing {input:?} with the {} dialect", self.dialect);
        let parsed = match self.dialect {
            Dialect::Lenient => ScopeParser::new(input, Strictness::Lenient, self.max_depth).run()?,
            Dialect::Strict => ScopeParser::new(input, Strictness::Strict, self.max_depth).run()?,
            Dialect::Spdx => Some(PrecedenceParser::new(input, self.max_depth).parse()?),
        };
        parsed.ok_or(ParseError::EmptyExpression {
            offset: input.len(),
        })
    }
}

/// Parse an expression leniently, returning `None` when nothing is parsed.
///
/// Malformed input never fails: stray tokens are dropped and missing
/// operands collapse onto the operand that is present.
///
/// # Examples
///
/// ```
/// use spdx_expr::{Expression, parse};
///
/// assert_eq!(
///     parse("GPL-2.0-or-later WITH Classpath-exception-2.0"),
///     Some(Expression::exception(
///         Expression::identifier("GPL-2.0-or-later"),
///         Expression::identifier("Classpath-exception-2.0"),
///     ))
/// );
/// assert_eq!(parse("   "), None);
/// ```
#[must_use]
pub fn parse(expression: &str) -> Option<Expression> {
    Parser::default()
        .parse(expression)
        .map_err(|err| log::debug!("no expression parsed from {expression:?}: {err}"))
        .ok()
}

/// Parse an expression with the strict dialect.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first malformed construct.
pub fn parse_strict(expression: &str) -> Result<Expression, ParseError> {
    Parser::new(Dialect::Strict).parse(expression)
}
