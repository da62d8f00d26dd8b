//! Multispec CLI - banded power spectra from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multispec")]
#[command(author, version, about = "Multi-resolution banded power spectra", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the banded power spectrum of a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show the bin layout a configuration produces
    Plan(commands::plan::PlanArgs),

    /// Write the default configuration to a TOML file
    InitConfig(commands::init_config::InitConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::InitConfig(args) => commands::init_config::run(args),
    }
}
