//! Parsing for SPDX license expressions.
//!
//! The crate turns strings such as `(MIT OR Apache-2.0) AND GPL-2.0-only WITH
//! Classpath-exception-2.0` into an [`Expression`] tree that license-policy
//! code can walk. It does not decide whether an expression satisfies a
//! policy, check identifiers against the SPDX license list, or render
//! expressions back to text.
//!
//! [`parse`] is lenient and never fails on malformed input; [`parse_strict`]
//! and [`Parser`] with a chosen [`Dialect`] report a [`ParseError`] instead.
//! The [`search`] module builds review search queries for components.

mod ast;
mod errors;
mod lexer;
mod parser;
pub mod search;

pub use ast::Expression;
pub use errors::ParseError;
pub use lexer::{Keyword, Lexer, Token, TokenKind, tokenize};
pub use parser::{DEFAULT_MAX_DEPTH, Dialect, DialectParseError, Parser, parse, parse_strict};
