//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "casemap",
    version,
    about = "Turn clinical case tables into YARRRML mapping rules",
    long_about = "Join clinical case data against an ontology mapping table and\n\
                  generate YARRRML rules for RDF materialization.\n\n\
                  `preprocess` builds the normalized table, `rules` renders one rule\n\
                  document, `run` generates rules per field for a project directory."
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

    /// Log output format (pretty for humans, json for machine parsing).
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

    /// Allow case-level values in trace logs (redacted otherwise).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Join a data table and a mapping table into the normalized table.
    Preprocess(PreprocessArgs),

    /// Render the rule document for a normalized table.
    Rules(RulesArgs),

    /// Generate rules per field for a project directory.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct PreprocessArgs {
    /// Case data CSV (one row per case, `case_id` column required).
    #[arg(long = "data", value_name = "CSV")]
    pub data: PathBuf,

    /// Mapping CSV (one row per field definition).
    #[arg(long = "mapping", value_name = "CSV")]
    pub mapping: PathBuf,

    /// Where to write the normalized table.
    #[arg(long = "output", value_name = "CSV")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct RulesArgs {
    /// Normalized table CSV.
    #[arg(long = "input", value_name = "CSV")]
    pub input: PathBuf,

    /// Where to write the YARRRML document.
    #[arg(long = "output", value_name = "PATH")]
    pub output: PathBuf,

    /// Source name written into every block (default: the input path).
    #[arg(long = "source", value_name = "NAME")]
    pub source: Option<String>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Project directory containing `preprocessed_data/preprocessed_data.csv`.
    #[arg(value_name = "PROJECT_DIR")]
    pub project: PathBuf,

    /// Materializer program, invoked as `<PROGRAM> [ARGS..] <rules> <output.ttl>` per field.
    ///
    /// Taken verbatim as one path; pass arguments with `--materializer-arg`.
    #[arg(
        long = "materializer",
        value_name = "PROGRAM",
        env = "CASEMAP_MATERIALIZER"
    )]
    pub materializer: Option<String>,

    /// Argument passed to the materializer before the file paths (repeatable).
    #[arg(
        long = "materializer-arg",
        value_name = "ARG",
        allow_hyphen_values = true,
        requires = "materializer"
    )]
    pub materializer_args: Vec<String>,

    /// Print the batch report as JSON on stdout.
    #[arg(long = "json")]
    pub json: bool,
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
