//! Thermogo CLI - Generate, explore and play on spherical worlds.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use thermogo::Coord;
use tracing_subscriber::EnvFilter;

/// Thermogo - A turn-based strategy game on a spherical world
#[derive(Parser, Debug)]
#[command(name = "thermogo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug output to stderr (overridden by `RUST_LOG`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a world and print it
    Generate {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Output format: text, plain, or json
        #[arg(short, long, default_value = "text")]
        format: cli::MapFormat,

        /// Save a new two-player game to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Find the shortest route between two tiles
    Path {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Start tile as x,y
        #[arg(long)]
        from: Coord,

        /// Goal tile as x,y
        #[arg(long)]
        to: Coord,

        /// Terrain to move on: land or sea
        #[arg(short, long, default_value = "land")]
        movement: cli::Movement,

        /// Distance estimate: spherical, manhattan, or zero
        #[arg(long, default_value = "spherical")]
        heuristic: cli::HeuristicArg,

        /// Read the map from a saved game instead of generating one
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Interactive TUI to explore the world and play
    View {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Resume a saved game
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// File written by the save key
        #[arg(long, default_value = "thermogo-save.json")]
        save: PathBuf,
    },

    /// Generate many worlds in parallel and report statistics
    Survey {
        #[command(flatten)]
        world: cli::WorldArgs,

        /// Number of seeds to generate (default: 100)
        #[arg(short = 'n', long, default_value = "100")]
        seeds: u32,

        /// First seed (default: the configured seed)
        #[arg(long)]
        start_seed: Option<u32>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::SurveyFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let result = match args.command {
        Commands::Generate {
            world,
            format,
            save,
        } => cli::generate::execute(&world, format, save.as_deref()),

        Commands::Path {
            world,
            from,
            to,
            movement,
            heuristic,
            load,
            format,
        } => cli::path::execute(&world, load.as_deref(), from, to, movement, heuristic, format),

        Commands::View { world, load, save } => cli::view::execute(&world, load.as_deref(), save),

        Commands::Survey {
            world,
            seeds,
            start_seed,
            threads,
            format,
            progress,
        } => cli::survey::execute(&world, seeds, start_seed, threads, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
