//! CLI command implementations for Thermogo.

pub(crate) mod generate;
pub(crate) mod path;
pub(crate) mod survey;
pub(crate) mod view;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use thermogo::{Heuristic, Layer, WorldConfig};

/// World generation options shared by several commands.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct WorldArgs {
    /// YAML world configuration file
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Map width in tiles (even; height is half of it)
    #[arg(short, long)]
    pub(crate) width: Option<u16>,

    /// Terrain seed
    #[arg(short, long)]
    pub(crate) seed: Option<u32>,

    /// Noise octaves (coastline detail)
    #[arg(long)]
    pub(crate) detail: Option<u32>,

    /// Noise sphere radius; smaller means bigger continents
    #[arg(long)]
    pub(crate) landmass: Option<f64>,

    /// Skip resource sampling
    #[arg(long)]
    pub(crate) no_resources: bool,
}

impl WorldArgs {
    /// Build the world configuration: file values first, then flags.
    pub(crate) fn resolve(&self) -> Result<WorldConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => WorldConfig::from_file(path).map_err(|e| {
                CliError::new(format!("Failed to load {}: {e}", path.display()))
            })?,
            None => WorldConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(detail) = self.detail {
            config.detail = detail;
        }
        if let Some(landmass) = self.landmass {
            config.landmass_size = landmass;
        }
        if self.no_resources {
            config.resources = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Output format for the `generate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum MapFormat {
    /// Coloured ASCII art.
    Text,
    /// Uncoloured ASCII art.
    Plain,
    /// Machine-readable JSON summary.
    Json,
}

/// Output format for the `path` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `survey` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SurveyFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Terrain a route is searched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Movement {
    /// Land tiles only.
    Land,
    /// Sea tiles only.
    Sea,
}

impl From<Movement> for Layer {
    fn from(m: Movement) -> Self {
        match m {
            Movement::Land => Self::Land,
            Movement::Sea => Self::Sea,
        }
    }
}

/// A* distance estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum HeuristicArg {
    /// Wraparound- and pole-aware octile distance.
    Spherical,
    /// Raw grid Manhattan distance.
    Manhattan,
    /// No estimate (Dijkstra).
    Zero,
}

impl From<HeuristicArg> for Heuristic {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Spherical => Self::Spherical,
            HeuristicArg::Manhattan => Self::Manhattan,
            HeuristicArg::Zero => Self::Zero,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<thermogo::MapError> for CliError {
    fn from(e: thermogo::MapError) -> Self {
        Self::new(format!("Map generation failed: {e}"))
    }
}

impl From<thermogo::PathError> for CliError {
    fn from(e: thermogo::PathError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<thermogo::SessionError> for CliError {
    fn from(e: thermogo::SessionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<thermogo::SnapshotError> for CliError {
    fn from(e: thermogo::SnapshotError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}
