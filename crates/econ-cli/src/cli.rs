//! CLI argument definitions for the harmonizer.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use econ_core::DuplicateDatePolicy;

#[derive(Parser)]
#[command(
    name = "econ-harmonize",
    version,
    about = "Harmonize inflation, commodity and wage sources into one dataset",
    long_about = "Harmonize macroeconomic sources into one country-year dataset.\n\n\
                  Reads World Bank inflation, IMF commodity prices and OECD wages,\n\
                  resolves countries to ISO 3166-1 alpha-3 codes and writes\n\
                  country_code,date,inflation_rate,wage_index,commodity_price."
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

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline and write the harmonized dataset.
    Harmonize(HarmonizeArgs),

    /// Check that the raw files exist and show what they contain.
    Inspect(InspectArgs),

    /// List the country registry, or show how names resolve.
    Countries(CountriesArgs),
}

/// Where the pipeline reads and writes.
#[derive(Parser, Default)]
pub struct SourceArgs {
    /// TOML configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the raw source files.
    #[arg(long = "raw-dir", value_name = "DIR")]
    pub raw_dir: Option<PathBuf>,
}

#[derive(Parser)]
pub struct HarmonizeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory for the harmonized dataset.
    #[arg(long = "processed-dir", value_name = "DIR")]
    pub processed_dir: Option<PathBuf>,

    /// File name of the harmonized dataset inside the processed directory.
    #[arg(long = "output-file", value_name = "NAME")]
    pub output_file: Option<String>,

    /// Countries need strictly more distinct dates than this to be kept.
    #[arg(long = "min-observations", value_name = "N")]
    pub min_observations: Option<usize>,

    /// How to handle a commodity date listed with different values.
    #[arg(long = "commodity-duplicates", value_enum)]
    pub commodity_duplicates: Option<DuplicatePolicyArg>,

    /// Run every stage but do not write the dataset.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write a JSON run report to this path.
    #[arg(long = "report", value_name = "FILE")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct InspectArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of rows to preview per file.
    #[arg(long = "rows", value_name = "N", default_value_t = 5)]
    pub rows: usize,
}

#[derive(Parser)]
pub struct CountriesArgs {
    /// Names or codes to resolve. Lists the whole registry when empty.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Registry CSV to use instead of the embedded ISO 3166-1 table.
    #[arg(long = "registry", value_name = "FILE")]
    pub registry: Option<PathBuf>,
}

/// CLI choices for duplicate commodity dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DuplicatePolicyArg {
    Fail,
    Mean,
}

impl From<DuplicatePolicyArg> for DuplicateDatePolicy {
    fn from(value: DuplicatePolicyArg) -> Self {
        match value {
            DuplicatePolicyArg::Fail => DuplicateDatePolicy::Fail,
            DuplicatePolicyArg::Mean => DuplicateDatePolicy::Mean,
        }
    }
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
