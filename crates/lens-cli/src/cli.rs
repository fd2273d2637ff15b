//! CLI argument definitions for `lens`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "lens",
    version,
    about = "Profile tabular files and derive trees or graphs from them",
    long_about = "Parse a CSV, TSV or JSON file, bind its columns to the roles of a \
                  schema, and derive a hierarchy, a per-column quality profile or a \
                  node/edge network."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the transformation selected by a schema.
    Run(RunArgs),

    /// Profile every column of a file.
    Profile(ProfileArgs),

    /// Check mappings against a schema and a file's columns.
    Validate(ValidateArgs),

    /// List the available schemas and their roles.
    Schemas(SchemasArgs),
}

/// Input file plus parsing options shared by every data command.
#[derive(Args)]
pub struct InputArgs {
    /// CSV, TSV or JSON file to read.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Override format detection.
    #[arg(long = "format", value_enum)]
    pub format: Option<InputFormatArg>,
}

/// Where the schema id and mappings come from.
#[derive(Args)]
pub struct MappingArgs {
    /// JSON bundle with a schema id and its mappings.
    #[arg(long = "bundle", value_name = "PATH", conflicts_with = "schema")]
    pub bundle: Option<PathBuf>,

    /// Schema id (used with --map instead of a bundle).
    #[arg(long = "schema", value_name = "ID")]
    pub schema: Option<String>,

    /// Column mapping as COLUMN=ROLE or COLUMN=ROLE:TRANSFORM. Repeatable.
    #[arg(long = "map", value_name = "MAPPING", conflicts_with = "bundle")]
    pub map: Vec<String>,

    /// JSON schema set replacing the built-in schemas.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProfileLimitArgs {
    /// Non-null values sampled for type inference.
    #[arg(long = "sample-size", value_name = "N", default_value_t = 100)]
    pub sample_size: usize,

    /// Omit frequency tables for columns with more distinct values than this.
    #[arg(long = "top-values-limit", value_name = "N", default_value_t = 1000)]
    pub top_values_limit: usize,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub mapping: MappingArgs,

    #[command(flatten)]
    pub limits: ProfileLimitArgs,

    /// Write the derived structure as JSON to this path ("-" for stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Skip mapping validation before running.
    #[arg(long = "no-validate")]
    pub no_validate: bool,
}

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Column mapping as COLUMN=ROLE or COLUMN=ROLE:TRANSFORM. Repeatable.
    #[arg(long = "map", value_name = "MAPPING")]
    pub map: Vec<String>,

    #[command(flatten)]
    pub limits: ProfileLimitArgs,

    /// Write the profiles as JSON to this path ("-" for stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub mapping: MappingArgs,
}

#[derive(Args)]
pub struct SchemasArgs {
    /// JSON schema set replacing the built-in schemas.
    #[arg(long = "schemas", value_name = "PATH")]
    pub schemas: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormatArg {
    Csv,
    Tsv,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
