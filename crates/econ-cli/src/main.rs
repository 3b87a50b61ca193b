//! Macroeconomic source harmonizer CLI.

use clap::Parser;

use econ_cli::cli::{Cli, Command};
use econ_cli::commands::{run_countries, run_harmonize, run_inspect};
use econ_cli::logging::{LogConfig, init_logging};
use econ_cli::summary::{print_countries, print_harmonize_summary, print_inspect};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = LogConfig::from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Harmonize(args) => match run_harmonize(&args) {
            Ok(result) => {
                print_harmonize_summary(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Inspect(args) => match run_inspect(&args) {
            Ok(result) => {
                print_inspect(&result);
                if result.all_loaded() { 0 } else { 1 }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Countries(args) => match run_countries(&args) {
            Ok(result) => {
                print_countries(&result);
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
