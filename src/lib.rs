// Allow unwrap and float comparisons in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! Thermogo: a turn-based strategy game on a spherical world.
//!
//! The world is a latitude/longitude grid whose terrain is sampled from 3D
//! noise on the surface of a sphere, so the map has no seams at the
//! antimeridian or the poles. Movement uses the same topology: columns wrap
//! around and walking over a pole lands on the far side of the globe.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / terminal viewer (binary)    │
//! ├─────────────────────────────────────┤
//! │  Session (players, units, turns)    │
//! │  View (camera, frames)  Snapshot    │
//! ├─────────────────────────────────────┤
//! │  Pathfinding (A* on land/sea)       │
//! ├─────────────────────────────────────┤
//! │  Graph (wrapped sphere adjacency)   │
//! ├─────────────────────────────────────┤
//! │  Map generation (noise → tiles)     │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use thermogo::{generate_map, Coord, Layer, WorldConfig};
//!
//! let (map, _sites) = generate_map(&WorldConfig::new(36, 7)).unwrap();
//! let route = map.find_path(Layer::Sea, Coord::new(0, 0), Coord::new(18, 0)).unwrap();
//! # let _ = route;
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod geo;
pub mod graph;
pub mod map;
pub mod path;
pub mod session;
pub mod snapshot;
pub mod view;

pub use config::WorldConfig;
pub use error::{ConfigError, MapError, PathError, SessionError, SnapshotError};
pub use field::{NoiseField, PerlinField};
pub use graph::{Graph, Layer, TileId};
pub use map::{Coord, ElevationBand, GameMap, ResourceSite, Tile, generate_map};
pub use path::{Heuristic, Route, Search, a_star};
pub use session::{Command, Event, GameSession};
pub use snapshot::{Snapshot, load_snapshot, save_snapshot};
