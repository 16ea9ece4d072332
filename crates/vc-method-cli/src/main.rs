mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;

use commands::theme::ThemeArgs;
use commands::venture::DealArgs;
use config::store::FileStore;
use config::DisplayConfig;

/// Venture Capital Method valuation
#[derive(Parser)]
#[command(
    name = "vcm",
    version,
    about = "Venture Capital Method valuation",
    long_about = "Values an early-stage investment with the Venture Capital Method: \
                  projected exit value discounted at a target rate of return, with \
                  implied ownership, pre-money valuation, ROI and a discount-rate \
                  sensitivity sweep."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding persisted preferences (default: ~/.vcm/)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Value a deal: exit value, post/pre-money, ownership, ROI, sensitivity
    Value(DealArgs),
    /// Valuation today across the 20%-70% discount-rate grid
    Sensitivity(DealArgs),
    /// Show or set the display theme used by table output
    Theme(ThemeArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli.log_level) {
        eprintln!("{}: failed to initialise logging: {}", "warning".yellow().bold(), e);
    }

    let store = FileStore::new(cli.data_dir.clone().unwrap_or_else(FileStore::default_path));
    let display = DisplayConfig::load(&store).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read preferences, using defaults");
        DisplayConfig::default()
    });
    config::init(display);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Value(args) => commands::venture::run_value(args),
        Commands::Sensitivity(args) => commands::venture::run_sensitivity(args),
        Commands::Theme(args) => commands::theme::run_theme(args, &store),
        Commands::Version => {
            println!("vcm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
