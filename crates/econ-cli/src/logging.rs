//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Every pipeline stage runs inside a `tracing` span; this module only decides
//! where events go and how they look.
//!
//! # Log Levels
//!
//! - `error`: fatal pipeline failures
//! - `warn`: missing raw files, dropped key collisions
//! - `info`: stage progress, row counts, durations
//! - `debug`: per-source cleaning details, dropped countries
//! - `trace`: everything else
//!
//! # Usage
//!
//! ```ignore
//! use econ_cli::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig {
//!     level_filter: LevelFilter::DEBUG,
//!     ..LogConfig::default()
//! };
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use clap::ColorChoice;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::cli::{Cli, LogFormatArg, LogLevelArg};

/// Crates whose events follow the configured level.
const WORKSPACE_TARGETS: [&str; 7] = [
    "econ_cli",
    "econ_common",
    "econ_core",
    "econ_ingest",
    "econ_model",
    "econ_standards",
    "econ_transform",
];

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Maximum level for workspace crates.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
    /// Whether to include target (module path) in log output.
    pub with_target: bool,
    /// Emit span close events (JSON format only).
    pub with_spans: bool,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
    pub format: LogFormat,
    /// Optional log file path. When set, logs are appended to the file.
    pub log_file: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_timestamps: false,
            with_target: false,
            with_spans: true,
            with_ansi: true,
            format: LogFormat::default(),
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Build logging configuration from CLI flags.
    ///
    /// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
    pub fn from_cli(cli: &Cli) -> Self {
        let level_filter = match cli.log_level {
            Some(LogLevelArg::Error) => LevelFilter::ERROR,
            Some(LogLevelArg::Warn) => LevelFilter::WARN,
            Some(LogLevelArg::Info) => LevelFilter::INFO,
            Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
            Some(LogLevelArg::Trace) => LevelFilter::TRACE,
            None => cli.verbosity.tracing_level_filter(),
        };
        let format = match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        };
        let with_ansi = match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        };
        Self {
            level_filter,
            use_env_filter: !(cli.verbosity.is_present() || cli.log_level.is_some()),
            with_timestamps: cli.log_timestamps,
            with_ansi,
            format,
            log_file: cli.log_file.clone(),
            ..Self::default()
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
///
/// # Panics
///
/// Panics if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    if let Some(path) = &config.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        init_logging_with_writer(config, SharedFileWriter::new(file));
    } else {
        init_logging_with_writer(config, io::stderr);
    }
    Ok(())
}

/// Initialize logging with a custom writer.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(config.with_target)
                .with_span_events(if config.with_spans {
                    fmt::format::FmtSpan::CLOSE
                } else {
                    fmt::format::FmtSpan::NONE
                });

            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .init();
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);

            if config.with_timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .init();
            }
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(config.with_ansi)
                .with_target(config.with_target);

            if config.with_timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .init();
            }
        }
    }
}

#[derive(Clone)]
struct SharedFileWriter {
    file: Arc<Mutex<std::fs::File>>,
}

impl SharedFileWriter {
    fn new(file: std::fs::File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
        }
    }
}

struct SharedFileGuard {
    file: Arc<Mutex<std::fs::File>>,
}

impl Write for SharedFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        guard.flush()
    }
}

impl<'a> MakeWriter<'a> for SharedFileWriter {
    type Writer = SharedFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        SharedFileGuard {
            file: Arc::clone(&self.file),
        }
    }
}

/// Default filter directive: workspace crates at `level`, everything else at warn.
pub fn default_filter_directive(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    let mut directive = format!("warn,{}", level_directive("econ_harmonize", &level));
    for target in WORKSPACE_TARGETS {
        directive.push(',');
        directive.push_str(&level_directive(target, &level));
    }
    directive
}

fn level_directive(target: &str, level: &str) -> String {
    format!("{target}={level}")
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::new(default_filter_directive(config.level_filter));
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::Parser;

    fn config(args: &[&str]) -> LogConfig {
        let cli = Cli::try_parse_from(
            ["econ-harmonize"].into_iter().chain(args.iter().copied()),
        )
        .unwrap();
        LogConfig::from_cli(&cli)
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(config(&["countries"]).level_filter, LevelFilter::WARN);
        assert_eq!(config(&["countries", "-v"]).level_filter, LevelFilter::INFO);
        assert_eq!(config(&["countries", "-vvv"]).level_filter, LevelFilter::TRACE);
        assert!(config(&["countries"]).use_env_filter);
        assert!(!config(&["countries", "-v"]).use_env_filter);
    }

    #[test]
    fn explicit_level_beats_verbosity() {
        let config = config(&["countries", "-vv", "--log-level", "error"]);
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn log_flags_reach_the_config() {
        let plain = config(&["--color", "never", "countries"]);
        assert!(!plain.with_timestamps);
        assert!(!plain.with_ansi);
        assert_eq!(plain.format, LogFormat::Pretty);

        let config = config(&[
            "--color",
            "always",
            "countries",
            "--log-timestamps",
            "--log-format",
            "compact",
            "--log-file",
            "run.log",
        ]);
        assert!(config.with_timestamps);
        assert!(config.with_ansi);
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
    }

    #[test]
    fn directive_covers_every_workspace_crate() {
        let directive = default_filter_directive(LevelFilter::DEBUG);
        assert!(directive.starts_with("warn,"));
        for target in WORKSPACE_TARGETS {
            assert!(directive.contains(&format!("{target}=debug")), "{directive}");
        }
        assert!(EnvFilter::try_new(&directive).is_ok());
    }

    #[test]
    fn off_level_is_a_valid_directive() {
        let directive = default_filter_directive(LevelFilter::OFF);
        assert!(directive.contains("econ_core=off"));
        assert!(EnvFilter::try_new(&directive).is_ok());
    }
}
