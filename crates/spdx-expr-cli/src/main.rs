//! `spdx-expr` binary: parse SPDX license expressions and print their trees.

use std::io;

use clap::Parser;
use tracing::{error, info};

use spdx_expr::Dialect;
use spdx_expr_cli::app::{RunSummary, read_inputs, run};
use spdx_expr_cli::config::{CliConfig, LogLevel};
use spdx_expr_cli::error::CliError;
use spdx_expr_cli::logging::init_logging;
use spdx_expr_cli::output::OutputFormat;

/// Parse SPDX license expressions and print their structure.
#[derive(Parser, Debug)]
#[command(name = "spdx-expr", version, about)]
struct Args {
    /// Grammar to apply (lenient, strict, spdx).
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Maximum parenthesis nesting accepted by the parser.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Output format (tree, debug, json).
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Expressions to parse; read one per line from stdin when omitted.
    expressions: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    match execute(&config, args.expressions) {
        Ok(RunSummary { parsed, failed }) => {
            info!(parsed, failed, "finished");
            if failed > 0 {
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!(error = %e, "spdx-expr failed");
            std::process::exit(1);
        }
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.dialect, args.max_depth, args.format))
}

fn execute(config: &CliConfig, expressions: Vec<String>) -> Result<RunSummary, CliError> {
    let inputs = if expressions.is_empty() {
        read_inputs(io::stdin().lock())?
    } else {
        expressions
    };
    let mut stdout = io::stdout().lock();
    run(config, inputs, &mut stdout)
}
