//! Job-change preprocessing CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use hrprep_cli::logging::{LogConfig, init_logging};
use tracing::error;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{run_classes, run_file};
use crate::summary::print_summary;

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(err) = init_logging(&log_config(&cli)) {
        eprintln!("error: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }
    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => {
            let result = run_file(&args)?;
            print_summary(&result);
            Ok(())
        }
        Command::Classes(args) => run_classes(&args),
    }
}

/// `--log-level` wins over `-v`/`-q`; `RUST_LOG` applies only when neither is given.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(LevelFilter::from);
    let ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    LogConfig::default()
        .with_level_filter(explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()))
        .with_env_filter(explicit.is_none() && !cli.verbosity.is_present())
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_ansi(ansi)
}
