use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod commands;
mod config;

use commands::{
    ChartCommand, ChildCommand, ConfigCommand, ExportCommand, ImportCommand, MeasureCommand,
    UnitsCommand,
};
use config::Config;
use sprouttrack_core::{StateStore, Store};

#[derive(Parser)]
#[command(name = "sprouttrack")]
#[command(version)]
#[command(about = "A child growth tracking CLI application", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tracked children
    Child(ChildCommand),

    /// Record and review measurements
    Measure(MeasureCommand),

    /// Render sparkline charts as SVG
    Chart(ChartCommand),

    /// Show or change display units
    Units(UnitsCommand),

    /// Export all data as a JSON backup
    Export(ExportCommand),

    /// Import a JSON backup, replacing all current data
    Import(ImportCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sprouttrack=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Config(cmd)) => cmd.run(&config),
        Some(command) => {
            let today = chrono::Local::now().date_naive();
            let state = StateStore::new(config.state_path.value.clone());
            tracing::debug!("State file: {}", state.path().display());

            let mut store = Store::new(state.load_or_seed(today));
            // Write every mutation through to disk
            let writer = state.clone();
            store.subscribe(move |doc| writer.persist(doc));

            match command {
                Commands::Child(cmd) => cmd.run(&mut store),
                Commands::Measure(cmd) => cmd.run(&mut store, today),
                Commands::Chart(cmd) => cmd.run(&store, today),
                Commands::Units(cmd) => cmd.run(&mut store),
                Commands::Export(cmd) => cmd.run(&store),
                Commands::Import(cmd) => cmd.run(&mut store, today),
                Commands::Config(_) => unreachable!("handled above"),
            }
        }
        None => {
            println!("Use --help to see available commands");
            Ok(())
        }
    }
}
