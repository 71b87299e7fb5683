//! Headless Dead Storm Rising runner.
//!
//! This binary runs the game without graphics, controlled via JSON on stdin/stdout.
//! Designed for AI agents, scripted tests and CI.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode - read commands from stdin
//! cargo run -p dsr_headless
//!
//! # Play from a scenario file
//! cargo run -p dsr_headless -- run --scenario scenarios/duel.ron
//!
//! # Print the starting board of a scenario
//! cargo run -p dsr_headless -- render --scenario scenarios/duel.ron
//!
//! # Check that a scenario file loads
//! cargo run -p dsr_headless -- validate --scenario scenarios/duel.ron
//! ```
//!
//! # Protocol
//!
//! Input (stdin): JSON commands, one per line
//! Output (stdout): JSON responses, one per line
//! Logs (stderr): Debug information
//!
//! See the protocol module for command/response format.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dsr_headless::{
    ascii_visualizer::{render_ascii, AsciiConfig},
    runner::{HeadlessConfig, HeadlessRunner},
    scenario::Scenario,
};

#[derive(Parser)]
#[command(name = "dsr_headless")]
#[command(about = "Headless Dead Storm Rising runner for AI clients and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive session over stdin/stdout
    Run {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: Option<PathBuf>,
    },

    /// Print the starting board as ASCII
    Render {
        /// Scenario file to load
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Label rows with their y coordinate
        #[arg(long)]
        coordinates: bool,
    },

    /// Check that a scenario file parses and describes a playable game
    Validate {
        /// Scenario file to check
        #[arg(short, long)]
        scenario: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout is for protocol)
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(filter)
        .init();

    match cli.command {
        Some(Commands::Run { scenario }) => cmd_run(scenario),
        Some(Commands::Render {
            scenario,
            coordinates,
        }) => cmd_render(scenario, coordinates),
        Some(Commands::Validate { scenario }) => cmd_validate(&scenario),
        None => {
            // Default: interactive mode
            cmd_run(None)
        }
    }
}

/// Run a single interactive session
fn cmd_run(scenario: Option<PathBuf>) -> ExitCode {
    tracing::info!("Starting interactive session");

    let config = HeadlessConfig {
        scenario_path: scenario,
    };
    let mut runner = match HeadlessRunner::with_config(&config) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::error!(error = %e, "Could not start session");
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    match runner.run(stdin.lock(), stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Session aborted");
            ExitCode::FAILURE
        }
    }
}

/// Print a scenario's starting board
fn cmd_render(scenario: Option<PathBuf>, coordinates: bool) -> ExitCode {
    let loaded = match scenario {
        Some(path) => Scenario::load(&path),
        None => Ok(Scenario::default()),
    };
    let game = match loaded.and_then(|s| s.start()) {
        Ok(game) => game,
        Err(e) => {
            tracing::error!(error = %e, "Could not load scenario");
            return ExitCode::FAILURE;
        }
    };

    let config = AsciiConfig {
        show_coordinates: coordinates,
        show_legend: true,
        ..AsciiConfig::default()
    };
    println!("{}", render_ascii(&game, &config));
    ExitCode::SUCCESS
}

/// Check a scenario file
fn cmd_validate(path: &Path) -> ExitCode {
    match Scenario::load(path) {
        Ok(scenario) => {
            println!(
                "{}: {} units, {} bases",
                scenario.name,
                scenario.config.layout.units.len(),
                scenario.config.layout.bases.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", path.display());
            ExitCode::FAILURE
        }
    }
}
