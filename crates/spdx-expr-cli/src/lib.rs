//! Command line front end for the `spdx-expr` parser.
//!
//! The binary parses SPDX license expressions given as arguments, or one per
//! line on stdin, and prints the resulting trees. Configuration comes from
//! `SPDX_EXPR_*` environment variables overridden by command line flags;
//! diagnostics are logged to stderr.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
