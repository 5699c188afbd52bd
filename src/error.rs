//! Error types for world generation, pathfinding, sessions and persistence.

use crate::graph::Layer;
use crate::map::Coord;
use crate::session::UnitId;
use thiserror::Error;

/// Errors raised while validating a world configuration or building a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The world width is zero or odd.
    #[error("world width must be an even number of at least 2, got {0}")]
    InvalidWidth(u16),

    /// A configuration parameter is out of range.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(&'static str),

    /// A stored tile grid has the wrong number of tiles.
    #[error("tile grid holds {found} tiles, expected {expected}")]
    TileCount {
        /// Tiles required by the grid dimensions.
        expected: usize,
        /// Tiles actually present.
        found: usize,
    },

    /// A stored tile does not match its slot in the grid.
    #[error("tile at index {index} is inconsistent with the grid")]
    InconsistentTile {
        /// Row-major index of the offending tile.
        index: usize,
    },
}

/// Errors raised by pathfinding entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PathError {
    /// The start or goal tile lies outside the grid.
    #[error("tile {coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Grid width.
        width: u16,
        /// Grid height.
        height: u16,
    },
}

/// Errors raised when a session command cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A game needs between 1 and 7 players.
    #[error("a game needs between 1 and {max} players, got {requested}")]
    PlayerCount {
        /// Players requested.
        requested: usize,
        /// Maximum supported.
        max: usize,
    },

    /// The active player has no actions left this turn.
    #[error("player {0} has no actions left this turn")]
    NoActionsLeft(u8),

    /// A coordinate is outside the map.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The terrain at a tile does not suit the requested unit.
    #[error("tile {at} is not {layer} terrain")]
    WrongTerrain {
        /// The target tile.
        at: Coord,
        /// The terrain the unit needs.
        layer: Layer,
    },

    /// Another living unit already occupies the tile.
    #[error("tile {0} is already occupied")]
    Occupied(Coord),

    /// No unit with the given id exists.
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    /// The unit belongs to another player.
    #[error("unit {unit} does not belong to player {player}")]
    NotOwner {
        /// The unit being ordered.
        unit: UnitId,
        /// The active player.
        player: u8,
    },

    /// Bases cannot move and dead units cannot act.
    #[error("unit {0} cannot move")]
    Immobile(UnitId),

    /// The goal cannot be reached on the unit's layer.
    #[error("no {layer} route from {from} to {to}")]
    NoRoute {
        /// Starting tile.
        from: Coord,
        /// Requested goal.
        to: Coord,
        /// Layer searched.
        layer: Layer,
    },

    /// Every unit id has been handed out.
    #[error("no unit ids left")]
    UnitIdsExhausted,

    /// The turn counter cannot advance further.
    #[error("turn limit reached")]
    TurnLimit,
}

/// Errors raised while loading a world configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The parsed configuration is invalid.
    #[error(transparent)]
    Invalid(#[from] MapError),
}

/// Errors raised while saving or loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Filesystem failure.
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed snapshot contents.
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} (expected {expected})")]
    Version {
        /// Version found in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// The stored session state is inconsistent.
    #[error("snapshot state is invalid: {0}")]
    Invalid(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_error_display() {
        let err = MapError::InvalidWidth(7);
        assert_eq!(
            err.to_string(),
            "world width must be an even number of at least 2, got 7"
        );
    }

    #[test]
    fn test_path_error_display() {
        let err = PathError::OutOfBounds {
            coord: Coord::new(9, 1),
            width: 4,
            height: 2,
        };
        assert_eq!(err.to_string(), "tile (9, 1) is outside the 4x2 grid");
    }

    #[test]
    fn test_session_error_wraps_path_error() {
        let inner = PathError::OutOfBounds {
            coord: Coord::new(0, 5),
            width: 4,
            height: 2,
        };
        let err = SessionError::from(inner);
        assert_eq!(err.to_string(), inner.to_string());
    }
}
