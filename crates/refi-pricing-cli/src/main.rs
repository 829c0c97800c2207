mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::rate_sheet::RateSheetArgs;
use commands::scenario::{ScenarioArgs, TierArgs};
use commands::schedule::ScheduleArgs;

/// Mortgage refinance pricing
#[derive(Parser)]
#[command(
    name = "refi",
    version,
    about = "Mortgage refinance pricing",
    long_about = "Quote refinance scenarios with decimal precision: fee-inclusive loan \
                  amount, government fees, points, temporary buydowns, PITI, debt \
                  consolidation savings and loan officer compensation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log pricing stages to stderr (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a refinance scenario
    Scenario(ScenarioArgs),
    /// Monthly amortization schedule for a loan
    Schedule(ScheduleArgs),
    /// Quote one scenario at several rate/points options
    RateSheet(RateSheetArgs),
    /// Infer the pricing tier and compensation for branch-gen points
    Tier(TierArgs),
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

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Scenario(args) => commands::scenario::run_scenario(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::RateSheet(args) => commands::rate_sheet::run_rate_sheet(args),
        Commands::Tier(args) => commands::scenario::run_tier(args),
        Commands::Version => {
            println!("refi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
