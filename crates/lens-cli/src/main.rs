//! `lens` command-line tool.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser};
use lens_cli::logging::{LogConfig, LogFormat, init_logging};
use lens_cli::summary::{print_mapping_report, print_summary};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_profile, run_schemas, run_transform, run_validate};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Run(args) => match run_transform(args) {
            Ok(derived) => {
                if !writes_to_stdout(args.output.as_ref()) {
                    print_summary(&derived);
                }
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Profile(args) => match run_profile(args) {
            Ok(derived) => {
                if !writes_to_stdout(args.output.as_ref()) {
                    print_summary(&derived);
                }
                0
            }
            Err(error) => report_error(&error),
        },
        Command::Validate(args) => match run_validate(args) {
            Ok(report) => {
                print_mapping_report(&report);
                i32::from(report.has_errors())
            }
            Err(error) => report_error(&error),
        },
        Command::Schemas(args) => match run_schemas(args) {
            Ok(()) => 0,
            Err(error) => report_error(&error),
        },
    };
    std::process::exit(exit_code);
}

fn report_error(error: &anyhow::Error) -> i32 {
    eprintln!("error: {error:#}");
    1
}

fn writes_to_stdout(output: Option<&PathBuf>) -> bool {
    output.is_some_and(|path| path.as_os_str() == "-")
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
