//! A* search over a tile graph.
//!
//! The search returns its predecessor and cost maps rather than a single
//! path, so callers can extract a route to the goal or inspect every tile
//! the search settled on the way. An unreachable goal is not an error: it
//! is simply absent from both maps.

use crate::error::PathError;
use crate::graph::{Graph, TileId};
use crate::map::Coord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::f64::consts::SQRT_2;
use tracing::trace;

/// Distance estimate used to order the A* frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    /// Octile distance over the wrapped column gap, capped by the cheapest
    /// detour through a pole. Never overestimates on a sphere grid.
    #[default]
    Spherical,
    /// `|dx| + |dy|` on raw grid coordinates, ignoring wraparound.
    ///
    /// Can overestimate near the seam, the poles, and along diagonals, so
    /// routes are not guaranteed optimal.
    Manhattan,
    /// Always zero; the search degenerates to Dijkstra.
    Zero,
}

impl Heuristic {
    /// Estimated cost from `a` to `b` on a `width` x `height` grid.
    #[must_use]
    pub fn estimate(self, a: Coord, b: Coord, width: u16, height: u16) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Manhattan => {
                f64::from(a.x.abs_diff(b.x)) + f64::from(a.y.abs_diff(b.y))
            }
            Self::Spherical => {
                if a == b {
                    return 0.0;
                }
                let dx = a.x.abs_diff(b.x);
                let dx = f64::from(dx.min(width.saturating_sub(dx)));
                let dy = f64::from(a.y.abs_diff(b.y));
                let octile = dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy);

                let top = height.saturating_sub(1);
                let via_south = u32::from(a.y) + u32::from(b.y);
                let via_north = u32::from(top - a.y) + u32::from(top - b.y);
                let via_pole = f64::from(via_south.min(via_north) + 1);

                octile.min(via_pole)
            }
        }
    }
}

/// Frontier entry; ordered so the heap pops the lowest priority first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    priority: f64,
    tile: TileId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.tile.cmp(&self.tile))
    }
}

/// Outcome of one A* search.
#[derive(Debug, Clone)]
pub struct Search {
    start: TileId,
    goal: TileId,
    came_from: HashMap<TileId, TileId>,
    cost_so_far: HashMap<TileId, f64>,
}

impl Search {
    /// Start tile.
    #[must_use]
    pub const fn start(&self) -> TileId {
        self.start
    }

    /// Goal tile.
    #[must_use]
    pub const fn goal(&self) -> TileId {
        self.goal
    }

    /// Predecessor of every reached tile except the start.
    #[must_use]
    pub const fn came_from(&self) -> &HashMap<TileId, TileId> {
        &self.came_from
    }

    /// Best known cost from the start to every reached tile.
    #[must_use]
    pub const fn cost_so_far(&self) -> &HashMap<TileId, f64> {
        &self.cost_so_far
    }

    /// Whether the goal was reached.
    #[must_use]
    pub fn found(&self) -> bool {
        self.cost_so_far.contains_key(&self.goal)
    }

    /// Cost to reach `tile`, if the search reached it.
    #[must_use]
    pub fn cost_to(&self, tile: TileId) -> Option<f64> {
        self.cost_so_far.get(&tile).copied()
    }

    /// Tiles from the start to `tile` inclusive, or `None` if unreached.
    #[must_use]
    pub fn path_to(&self, tile: TileId) -> Option<Vec<TileId>> {
        if !self.cost_so_far.contains_key(&tile) {
            return None;
        }
        let mut path = vec![tile];
        let mut current = tile;
        while current != self.start {
            current = *self.came_from.get(&current)?;
            path.push(current);
        }
        path.reverse();
        Some(path)
    }

    /// Tiles from the start to the goal inclusive, or `None` if unreachable.
    #[must_use]
    pub fn path(&self) -> Option<Vec<TileId>> {
        self.path_to(self.goal)
    }
}

/// A concrete route between two tiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Tiles visited, from start to goal inclusive.
    pub steps: Vec<Coord>,
    /// Total movement cost.
    pub cost: f64,
}

impl Route {
    /// Number of moves (one less than the number of tiles).
    #[must_use]
    pub fn moves(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Run A* from `start` to `goal` over `graph`.
///
/// The search stops as soon as the goal is popped or the frontier runs dry.
/// Entries made stale by a cheaper relaxation are skipped when popped.
///
/// # Errors
///
/// Returns [`PathError::OutOfBounds`] if either endpoint is outside the grid.
pub fn a_star(
    graph: &Graph,
    start: Coord,
    goal: Coord,
    heuristic: Heuristic,
) -> Result<Search, PathError> {
    let (width, height) = (graph.width(), graph.height());
    let out_of_bounds = |coord| PathError::OutOfBounds {
        coord,
        width,
        height,
    };
    let start_id = graph.id(start).ok_or_else(|| out_of_bounds(start))?;
    let goal_id = graph.id(goal).ok_or_else(|| out_of_bounds(goal))?;

    let mut came_from = HashMap::new();
    let mut cost_so_far = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut expanded = 0;

    cost_so_far.insert(start_id, 0.0);
    frontier.push(Frontier {
        priority: 0.0,
        tile: start_id,
    });

    while let Some(Frontier { priority, tile }) = frontier.pop() {
        let Some(&g) = cost_so_far.get(&tile) else {
            continue;
        };
        let h = heuristic.estimate(graph.coord(tile), goal, width, height);
        if priority > g + h {
            continue;
        }
        expanded += 1;
        if tile == goal_id {
            break;
        }

        for edge in graph.neighbors(tile) {
            let next_cost = g + edge.cost;
            let improved = cost_so_far
                .get(&edge.to)
                .is_none_or(|&known| next_cost < known);
            if improved {
                cost_so_far.insert(edge.to, next_cost);
                came_from.insert(edge.to, tile);
                let h = heuristic.estimate(graph.coord(edge.to), goal, width, height);
                frontier.push(Frontier {
                    priority: next_cost + h,
                    tile: edge.to,
                });
            }
        }
    }

    trace!(
        %start,
        %goal,
        expanded,
        found = cost_so_far.contains_key(&goal_id),
        "a* search finished"
    );

    Ok(Search {
        start: start_id,
        goal: goal_id,
        came_from,
        cost_so_far,
    })
}

/// Run A* and turn the result into a [`Route`], or `None` if unreachable.
///
/// # Errors
///
/// Returns [`PathError::OutOfBounds`] if either endpoint is outside the grid.
pub fn find_route(
    graph: &Graph,
    start: Coord,
    goal: Coord,
    heuristic: Heuristic,
) -> Result<Option<Route>, PathError> {
    let search = a_star(graph, start, goal, heuristic)?;
    Ok(search.path().and_then(|ids| {
        let cost = search.cost_to(search.goal())?;
        Some(Route {
            steps: ids.into_iter().map(|id| graph.coord(id)).collect(),
            cost,
        })
    }))
}
