//! Weighted tile adjacency.
//!
//! A [`Graph`] is an arena of edge lists indexed by [`TileId`]
//! (`y * width + x`). The full sphere graph is built once per map; the land
//! and sea layers are filtered copies that own their edge lists outright, so
//! editing one never touches another.

pub mod topology;

use crate::error::MapError;
use crate::map::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a tile in row-major order.
pub type TileId = usize;

/// A directed, weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Target tile.
    pub to: TileId,
    /// Movement cost.
    pub cost: f64,
}

/// Terrain layer a unit moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Tiles with elevation above zero.
    Land,
    /// Tiles with elevation at or below zero.
    Sea,
}

impl Layer {
    /// Whether a tile of the given elevation belongs to this layer.
    #[must_use]
    pub fn accepts(self, elevation: f64) -> bool {
        match self {
            Self::Land => elevation > 0.0,
            Self::Sea => elevation <= 0.0,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Land => write!(f, "land"),
            Self::Sea => write!(f, "sea"),
        }
    }
}

/// Adjacency lists for a `width` x `height` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    width: u16,
    height: u16,
    edges: Vec<Vec<Edge>>,
}

impl Graph {
    /// Build the full adjacency of a wrapped sphere grid.
    ///
    /// Every tile gets up to eight neighbours: cardinal steps cost 1.0 and
    /// diagonal steps cost `sqrt(2)`, with horizontal wraparound and pole
    /// folding as described in [`topology`].
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidWidth`] if `width` is zero or odd, and
    /// [`MapError::InvalidConfig`] if `height` is zero.
    pub fn sphere(width: u16, height: u16) -> Result<Self, MapError> {
        if width < 2 || width % 2 != 0 {
            return Err(MapError::InvalidWidth(width));
        }
        if height == 0 {
            return Err(MapError::InvalidConfig("grid height must be at least 1"));
        }

        let mut edges = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                let list = topology::neighbors(Coord::new(x, y), width, height)
                    .into_iter()
                    .map(|(c, cost)| Edge {
                        to: c.index(width),
                        cost,
                    })
                    .collect();
                edges.push(list);
            }
        }

        Ok(Self {
            width,
            height,
            edges,
        })
    }

    /// A copy holding only edges whose endpoints both satisfy `keep`.
    ///
    /// Tiles that fail `keep` stay in the arena with no edges.
    #[must_use]
    pub fn filtered(&self, keep: impl Fn(TileId) -> bool) -> Self {
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(id, list)| {
                if keep(id) {
                    list.iter().copied().filter(|e| keep(e.to)).collect()
                } else {
                    Vec::new()
                }
            })
            .collect();
        Self {
            width: self.width,
            height: self.height,
            edges,
        }
    }

    /// Grid width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of tiles in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Total number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(Vec::len).sum()
    }

    /// Id of a coordinate, or `None` if it is outside the grid.
    #[must_use]
    pub const fn id(&self, coord: Coord) -> Option<TileId> {
        if coord.in_bounds(self.width, self.height) {
            Some(coord.index(self.width))
        } else {
            None
        }
    }

    /// Coordinate of a tile id.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn coord(&self, id: TileId) -> Coord {
        let w = self.width as usize;
        Coord::new((id % w) as u16, (id / w) as u16)
    }

    /// Outgoing edges of a tile; empty for unknown ids.
    #[must_use]
    pub fn neighbors(&self, id: TileId) -> &[Edge] {
        self.edges.get(id).map_or(&[], Vec::as_slice)
    }

    /// Cost of the edge `from -> to`, if present.
    #[must_use]
    pub fn cost(&self, from: TileId, to: TileId) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .find(|e| e.to == to)
            .map(|e| e.cost)
    }

    /// Remove the edge `from -> to`, returning its cost.
    pub fn remove_edge(&mut self, from: TileId, to: TileId) -> Option<f64> {
        let list = self.edges.get_mut(from)?;
        let pos = list.iter().position(|e| e.to == to)?;
        Some(list.swap_remove(pos).cost)
    }

    /// Remove every edge into or out of `id`.
    pub fn isolate(&mut self, id: TileId) {
        let Some(out) = self.edges.get_mut(id).map(std::mem::take) else {
            return;
        };
        for edge in out {
            if let Some(list) = self.edges.get_mut(edge.to) {
                list.retain(|e| e.to != id);
            }
        }
    }

    /// Whether every edge has a reverse edge of equal cost.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.edges.iter().enumerate().all(|(from, list)| {
            list.iter().all(|e| {
                self.cost(e.to, from)
                    .is_some_and(|back| (back - e.cost).abs() < f64::EPSILON)
            })
        })
    }

    /// Label every tile with the connected component it belongs to.
    ///
    /// Tiles with no edges that fail `include` get `None`.
    #[must_use]
    pub fn components(&self, include: impl Fn(TileId) -> bool) -> (Vec<Option<usize>>, usize) {
        let mut labels = vec![None; self.edges.len()];
        let mut count = 0;
        let mut stack = Vec::new();
        for root in 0..self.edges.len() {
            if labels[root].is_some() || !include(root) {
                continue;
            }
            labels[root] = Some(count);
            stack.push(root);
            while let Some(id) = stack.pop() {
                for edge in &self.edges[id] {
                    if labels[edge.to].is_none() {
                        labels[edge.to] = Some(count);
                        stack.push(edge.to);
                    }
                }
            }
            count += 1;
        }
        (labels, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_rejects_bad_dimensions() {
        assert_eq!(Graph::sphere(3, 2), Err(MapError::InvalidWidth(3)));
        assert_eq!(Graph::sphere(0, 2), Err(MapError::InvalidWidth(0)));
        assert!(matches!(
            Graph::sphere(4, 0),
            Err(MapError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_sphere_is_symmetric() {
        for (w, h) in [(2, 1), (4, 2), (4, 4), (10, 5), (36, 18)] {
            let g = Graph::sphere(w, h).unwrap();
            assert!(g.is_symmetric(), "{w}x{h}");
            assert_eq!(g.len(), usize::from(w) * usize::from(h));
        }
    }

    #[test]
    fn test_id_coord_round_trip() {
        let g = Graph::sphere(8, 4).unwrap();
        let c = Coord::new(5, 3);
        let id = g.id(c).unwrap();
        assert_eq!(id, 29);
        assert_eq!(g.coord(id), c);
        assert_eq!(g.id(Coord::new(8, 0)), None);
    }

    #[test]
    fn test_filtered_drops_crossing_edges() {
        let g = Graph::sphere(8, 4).unwrap();
        let left = g.filtered(|id| g.coord(id).x < 4);
        for id in 0..left.len() {
            let inside = g.coord(id).x < 4;
            for e in left.neighbors(id) {
                assert!(inside);
                assert!(g.coord(e.to).x < 4);
            }
        }
        assert!(left.is_symmetric());
        assert!(left.edge_count() < g.edge_count());
    }

    #[test]
    fn test_remove_edge_leaves_source_intact() {
        let g = Graph::sphere(8, 4).unwrap();
        let mut copy = g.filtered(|_| true);
        assert_eq!(copy, g);
        let removed = copy.remove_edge(9, 10);
        assert!(removed.is_some());
        assert_eq!(copy.cost(9, 10), None);
        assert!(g.cost(9, 10).is_some());
    }

    #[test]
    fn test_isolate() {
        let mut g = Graph::sphere(8, 4).unwrap();
        g.isolate(12);
        assert!(g.neighbors(12).is_empty());
        assert!((0..g.len()).all(|id| g.cost(id, 12).is_none()));
        assert!(g.is_symmetric());
    }

    #[test]
    fn test_components() {
        let g = Graph::sphere(8, 4).unwrap();
        let (_, count) = g.components(|_| true);
        assert_eq!(count, 1);

        let keep = |id| {
            let c = g.coord(id);
            c.x % 4 != 0 && (1..=2).contains(&c.y)
        };
        let split = g.filtered(keep);
        let (labels, count) = split.components(keep);
        assert_eq!(count, 2);
        assert_eq!(labels[0], None);
        assert_eq!(labels[9], labels[18]);
        assert_ne!(labels[9], labels[13]);
    }
}
