#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;

use ctorchain_cli::args::{CliArgs, OutputFormat};
use ctorchain_cli::driver::{self, RunResult};
use ctorchain_cli::reporter::{Reporter, render_json};
use ctorchain_cli::tracing_config::init_tracing;

const EXIT_SUCCESS: u8 = 0;
const EXIT_VIOLATIONS: u8 = 1;
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    // Initialize tracing if CTORCHAIN_LOG or RUST_LOG is set (zero cost otherwise).
    init_tracing();

    let args = CliArgs::parse();
    match run(&args) {
        Ok(result) if result.diagnostics.is_empty() => ExitCode::from(EXIT_SUCCESS),
        Ok(_) => ExitCode::from(EXIT_VIOLATIONS),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(args: &CliArgs) -> Result<RunResult> {
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let result = driver::run(args, &cwd)?;

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&result)?),
        OutputFormat::Text => {
            let color = !args.no_color && std::io::stdout().is_terminal();
            let reporter = Reporter::new(color);
            if args.explain {
                print!("{}", reporter.render_explanations(&result.explanations));
            }
            print!("{}", reporter.render(&result.diagnostics));
            println!("{}", reporter.render_summary(&result));
        }
    }
    Ok(result)
}
