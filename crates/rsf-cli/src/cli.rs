//! CLI argument definitions for the RSF engine.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "rsf-engine",
    version,
    about = "RSF billing exchange toolkit - decode, validate, and merge RSF data",
    long_about = "Decode fixed-width RSF billing files or spreadsheet archives, \
                  validate the decoded dataset against the business rules, and \
                  merge schedule updates or record imports back into it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Decode a fixed-width RSF file and validate it against all rules.
    Validate(ValidateArgs),

    /// Apply a spreadsheet archive (HORAIRES or LIGNES) to an RSF file.
    Import(ImportArgs),

    /// List the record layouts registered for a year.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Path to the fixed-width RSF file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Exchange-format year of the file.
    #[arg(long, default_value_t = 2017)]
    pub year: u16,

    /// Print the validation report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to a file.
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the fixed-width RSF file to update.
    #[arg(value_name = "RSF_FILE")]
    pub rsf_file: PathBuf,

    /// Path to the ZIP archive holding the HORAIRES or LIGNES workbook.
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Exchange-format year of the file.
    #[arg(long, default_value_t = 2017)]
    pub year: u16,

    /// Print reports as JSON instead of tables.
    #[arg(long)]
    pub json: bool,

    /// Write the updated dataset as JSON.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Exchange-format year to describe.
    #[arg(long, default_value_t = 2017)]
    pub year: u16,
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
