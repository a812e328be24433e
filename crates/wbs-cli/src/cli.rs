//! CLI argument definitions for the `wbs` tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "wbs",
    version,
    about = "Check tabular-to-Wikibase schema mappings",
    long_about = "Check how source table columns map onto a Wikibase item schema.\n\n\
                  Explains storage type compatibility, lists droppable targets per \
                  column and validates saved item schemas for completeness and \
                  duplicate mappings."
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

    /// JSON file with validation options (length limits, rule toggles).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show which semantic types a storage type can be mapped to.
    Compat(CompatArgs),

    /// List droppable targets for each source column, best match first.
    Targets(TargetsArgs),

    /// Validate a saved item schema for completeness and duplicates.
    Check(CheckArgs),
}

#[derive(Parser)]
pub struct CompatArgs {
    /// Storage type as reported by the source, e.g. "VARCHAR(255)".
    #[arg(value_name = "STORAGE_TYPE")]
    pub storage_type: String,
}

#[derive(Parser)]
pub struct TargetsArgs {
    /// JSON array of schema targets.
    #[arg(value_name = "TARGETS_JSON")]
    pub targets: PathBuf,

    /// JSON array of column descriptors.
    #[arg(value_name = "COLUMNS_JSON")]
    pub columns: PathBuf,

    /// Only report this column.
    #[arg(long = "column", value_name = "NAME")]
    pub column: Option<String>,
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Item schema document.
    #[arg(value_name = "SCHEMA_JSON")]
    pub schema: PathBuf,
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
