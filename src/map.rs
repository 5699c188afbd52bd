//! The world map: a tile grid wrapped around a sphere.
//!
//! A [`GameMap`] owns its tiles and three adjacency graphs: the full sphere
//! graph, and land and sea layers derived from it when the map is built.
//! Maps are never edited in place; regenerating or loading produces a new one.

mod coord;
mod generate;
mod tile;

pub use coord::{Coord, ParseCoordError};
pub use generate::{RESOURCE_SEED_OFFSET, ResourceSite, generate_map, generate_with};
pub use tile::{ELEVATION_SCALE_M, ElevationBand, Rgb, Tile};

use crate::config::WorldConfig;
use crate::error::{MapError, PathError};
use crate::geo::{grid_to_lat_long, surface_distance};
use crate::graph::{Graph, Layer, TileId};
use crate::path::{self, Heuristic, Route, Search};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A generated world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MapRecord", into = "MapRecord")]
pub struct GameMap {
    config: WorldConfig,
    tiles: Vec<Tile>,
    graph: Graph,
    land: Graph,
    sea: Graph,
}

/// Serialized form of a map; graphs are rebuilt on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapRecord {
    config: WorldConfig,
    tiles: Vec<Tile>,
}

impl TryFrom<MapRecord> for GameMap {
    type Error = MapError;

    fn try_from(record: MapRecord) -> Result<Self, Self::Error> {
        Self::from_tiles(record.config, record.tiles)
    }
}

impl From<GameMap> for MapRecord {
    fn from(map: GameMap) -> Self {
        Self {
            config: map.config,
            tiles: map.tiles,
        }
    }
}

impl GameMap {
    /// Assemble a map from a row-major tile grid and derive its graphs.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the tile count does
    /// not match the grid, or a tile disagrees with its slot.
    pub fn from_tiles(config: WorldConfig, tiles: Vec<Tile>) -> Result<Self, MapError> {
        config.validate()?;
        let (width, height) = (config.width, config.height());
        let expected = usize::from(width) * usize::from(height);
        if tiles.len() != expected {
            return Err(MapError::TileCount {
                expected,
                found: tiles.len(),
            });
        }
        for (index, tile) in tiles.iter().enumerate() {
            let (la, lo) = grid_to_lat_long(tile.coord(), width, height);
            let coord = tile.coord();
            let placed = coord.in_bounds(width, height) && coord.index(width) == index;
            let located =
                (la - tile.latitude()).abs() < 1e-9 && (lo - tile.longitude()).abs() < 1e-9;
            if !(placed && located && tile.is_consistent()) {
                return Err(MapError::InconsistentTile { index });
            }
        }

        let graph = Graph::sphere(width, height)?;
        let land = graph.filtered(|id| tiles[id].is_land());
        let sea = graph.filtered(|id| !tiles[id].is_land());
        debug!(
            width,
            height,
            full_edges = graph.edge_count(),
            land_edges = land.edge_count(),
            sea_edges = sea.edge_count(),
            "derived map graphs"
        );

        Ok(Self {
            config,
            tiles,
            graph,
            land,
            sea,
        })
    }

    /// The configuration the map was generated from.
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Grid width in tiles.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.config.width
    }

    /// Grid height in tiles.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.config.height()
    }

    /// Physical world radius in kilometres.
    #[must_use]
    pub const fn world_radius_km(&self) -> f64 {
        self.config.world_radius_km
    }

    /// Great-circle length of a route in kilometres, summed step by step.
    #[must_use]
    pub fn route_distance_km(&self, route: &Route) -> f64 {
        let (width, height, radius) = (self.width(), self.height(), self.world_radius_km());
        route
            .steps
            .windows(2)
            .map(|pair| surface_distance(pair[0], pair[1], width, height, radius))
            .sum()
    }

    /// All tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Whether a coordinate is on the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.in_bounds(self.width(), self.height())
    }

    /// Tile id of a coordinate, or `None` off the grid.
    #[must_use]
    pub const fn id(&self, coord: Coord) -> Option<TileId> {
        self.graph.id(coord)
    }

    /// Tile at a coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.id(coord).and_then(|id| self.tiles.get(id))
    }

    /// Tile at a coordinate, or an out-of-bounds error.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutOfBounds`] if the coordinate is off the grid.
    pub fn tile(&self, coord: Coord) -> Result<&Tile, PathError> {
        self.get(coord).ok_or(PathError::OutOfBounds {
            coord,
            width: self.width(),
            height: self.height(),
        })
    }

    /// The full adjacency graph.
    #[must_use]
    pub const fn graph(&self) -> &Graph {
        &self.graph
    }

    /// The land-only graph.
    #[must_use]
    pub const fn land_graph(&self) -> &Graph {
        &self.land
    }

    /// The sea-only graph.
    #[must_use]
    pub const fn sea_graph(&self) -> &Graph {
        &self.sea
    }

    /// The graph for a movement layer.
    #[must_use]
    pub const fn layer_graph(&self, layer: Layer) -> &Graph {
        match layer {
            Layer::Land => &self.land,
            Layer::Sea => &self.sea,
        }
    }

    /// Whether a tile belongs to a layer.
    #[must_use]
    pub fn is_layer(&self, coord: Coord, layer: Layer) -> bool {
        self.get(coord)
            .is_some_and(|tile| layer.accepts(tile.elevation()))
    }

    /// Run A* on one layer.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutOfBounds`] if either endpoint is off the grid.
    pub fn search(
        &self,
        layer: Layer,
        start: Coord,
        goal: Coord,
        heuristic: Heuristic,
    ) -> Result<Search, PathError> {
        path::a_star(self.layer_graph(layer), start, goal, heuristic)
    }

    /// Shortest route on one layer, or `None` if the goal is unreachable.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::OutOfBounds`] if either endpoint is off the grid.
    pub fn find_path(
        &self,
        layer: Layer,
        start: Coord,
        goal: Coord,
    ) -> Result<Option<Route>, PathError> {
        path::find_route(self.layer_graph(layer), start, goal, Heuristic::default())
    }

    /// Fraction of tiles that are land.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn land_fraction(&self) -> f64 {
        if self.tiles.is_empty() {
            return 0.0;
        }
        let land = self.tiles.iter().filter(|t| t.is_land()).count();
        land as f64 / self.tiles.len() as f64
    }

    /// Number of connected regions (continents or oceans) on a layer.
    #[must_use]
    pub fn region_count(&self, layer: Layer) -> usize {
        let graph = self.layer_graph(layer);
        let (_, count) = graph.components(|id| layer.accepts(self.tiles[id].elevation()));
        count
    }
}
