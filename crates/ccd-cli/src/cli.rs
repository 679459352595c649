//! CLI argument definitions for the CCD text extractor.

use std::path::PathBuf;

use ccd_model::Domain;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "ccd-text",
    version,
    about = "Extract coded narrative tables from CCD documents",
    long_about = "Extract the narrative tables of coded CCD sections.\n\n\
                  Recognized sections (Problems, Medications, Allergies, Immunizations,\n\
                  Vitals, Procedures, Encounters, Insurances, Labs) are converted into\n\
                  rows keyed by their table header text."
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

    /// Include table content in parse failure logs.
    ///
    /// Narrative tables hold patient data; by default it is redacted.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the recognized section codes and their domains.
    Domains,

    /// Extract every recognized section of a document.
    Extract(ExtractArgs),

    /// Print a single value addressed by domain, row and column.
    Field(FieldArgs),
}

#[derive(Parser)]
pub struct ExtractArgs {
    /// Path to the ClinicalDocument XML file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Only show one domain (e.g. Allergies).
    #[arg(long = "domain", value_name = "NAME")]
    pub domain: Option<Domain>,
}

#[derive(Parser)]
pub struct FieldArgs {
    /// Path to the ClinicalDocument XML file.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Domain display name (e.g. Allergies).
    #[arg(value_name = "DOMAIN")]
    pub domain: String,

    /// Zero-based row index.
    #[arg(value_name = "INDEX")]
    pub index: usize,

    /// Column name as written in the table header.
    #[arg(value_name = "COLUMN")]
    pub column: String,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
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
