//! Error types reported by the expression parser.

use thiserror::Error;

use crate::lexer::Keyword;

/// Reasons an expression could not be turned into a tree.
///
/// Every variant records the byte offset (zero-based) where the problem was
/// detected. The lenient dialect only ever reports
/// [`ParseError::EmptyExpression`] and [`ParseError::NestingTooDeep`].
///
/// # Examples
///
/// ```
/// use spdx_expr::{ParseError, parse_strict};
///
/// let err = parse_strict("MIT AND").err();
/// assert!(matches!(err, Some(ParseError::MissingOperand { offset: 7, .. })));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input contained nothing to parse.
    #[error("empty license expression at byte {offset}")]
    EmptyExpression {
        /// Where the input ended.
        offset: usize,
    },
    /// A token appeared where the grammar does not allow it.
    #[error("unexpected token {found} at byte {offset}")]
    UnexpectedToken {
        /// Start of the offending token.
        offset: usize,
        /// Human readable rendering of the token.
        found: String,
    },
    /// An operator lacks its left or right operand.
    #[error("expected license expression around '{operator}' at byte {offset}")]
    MissingOperand {
        /// Where the operand was expected.
        offset: usize,
        /// The operator missing an operand.
        operator: Keyword,
    },
    /// A `(` without matching `)`, or a `)` without matching `(`.
    #[error("unmatched parenthesis at byte {offset}")]
    UnmatchedParenthesis {
        /// Position of the unmatched parenthesis.
        offset: usize,
    },
    /// `()` with nothing inside.
    #[error("empty parentheses at byte {offset}")]
    EmptyGroup {
        /// Position of the opening parenthesis.
        offset: usize,
    },
    /// Parentheses nest deeper than the parser allows.
    #[error("expression nests deeper than {limit} levels at byte {offset}")]
    NestingTooDeep {
        /// Start of the token that exceeded the limit.
        offset: usize,
        /// The configured maximum depth.
        limit: usize,
    },
}

impl ParseError {
    /// Byte offset where the error was detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::EmptyExpression { offset }
            | Self::UnexpectedToken { offset, .. }
            | Self::MissingOperand { offset, .. }
            | Self::UnmatchedParenthesis { offset }
            | Self::EmptyGroup { offset }
            | Self::NestingTooDeep { offset, .. } => *offset,
        }
    }
}
