//! Neighbour rules for a grid wrapped around a sphere.
//!
//! Columns wrap horizontally, so the grid is a cylinder. Stepping past the
//! top or bottom row crosses the pole: the walker stays on the pole row and
//! lands half a world away, at the antipodal longitude.

use crate::map::Coord;
use std::f64::consts::SQRT_2;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: f64 = 1.0;

/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = SQRT_2;

/// The eight step directions with their costs, row by row.
pub const DIRECTIONS: [(i32, i32, f64); 8] = [
    (-1, -1, DIAGONAL_COST),
    (0, -1, CARDINAL_COST),
    (1, -1, DIAGONAL_COST),
    (-1, 0, CARDINAL_COST),
    (1, 0, CARDINAL_COST),
    (-1, 1, DIAGONAL_COST),
    (0, 1, CARDINAL_COST),
    (1, 1, DIAGONAL_COST),
];

/// The tile reached by stepping `(dx, dy)` from `coord` on a wrapped grid.
///
/// The caller guarantees `coord` is in bounds, `width` is even and non-zero,
/// and `height` is non-zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn step(coord: Coord, dx: i32, dy: i32, width: u16, height: u16) -> Coord {
    let w = i32::from(width);
    let h = i32::from(height);
    let x = i32::from(coord.x) + dx;
    let y = i32::from(coord.y) + dy;

    let (nx, ny) = if (0..h).contains(&y) {
        (x.rem_euclid(w), y)
    } else {
        ((x + w / 2).rem_euclid(w), i32::from(coord.y))
    };
    Coord::new(nx as u16, ny as u16)
}

/// Every distinct neighbour of `coord` with its step cost.
///
/// On tiny grids several directions can reach the same tile; the cheapest
/// cost is kept. A step that lands back on `coord` is dropped.
#[must_use]
pub fn neighbors(coord: Coord, width: u16, height: u16) -> Vec<(Coord, f64)> {
    let mut out: Vec<(Coord, f64)> = Vec::with_capacity(DIRECTIONS.len());
    for (dx, dy, cost) in DIRECTIONS {
        let next = step(coord, dx, dy, width, height);
        if next == coord {
            continue;
        }
        match out.iter_mut().find(|(c, _)| *c == next) {
            Some(existing) => existing.1 = existing.1.min(cost),
            None => out.push((next, cost)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cost_to(list: &[(Coord, f64)], target: Coord) -> Option<f64> {
        list.iter().find(|(c, _)| *c == target).map(|(_, cost)| *cost)
    }

    #[test]
    fn test_interior_has_eight_neighbors() {
        let n = neighbors(Coord::new(5, 5), 20, 10);
        assert_eq!(n.len(), 8);
        assert_eq!(cost_to(&n, Coord::new(4, 5)), Some(CARDINAL_COST));
        assert_eq!(cost_to(&n, Coord::new(6, 6)), Some(DIAGONAL_COST));
    }

    #[test]
    fn test_horizontal_wrap() {
        let n = neighbors(Coord::new(0, 3), 20, 10);
        assert_eq!(cost_to(&n, Coord::new(19, 3)), Some(CARDINAL_COST));
        assert_eq!(cost_to(&n, Coord::new(19, 4)), Some(DIAGONAL_COST));
        let n = neighbors(Coord::new(19, 3), 20, 10);
        assert_eq!(cost_to(&n, Coord::new(0, 3)), Some(CARDINAL_COST));
    }

    #[test]
    fn test_pole_fold() {
        let n = neighbors(Coord::new(3, 0), 20, 10);
        assert_eq!(cost_to(&n, Coord::new(13, 0)), Some(CARDINAL_COST));
        assert!(n.iter().all(|(c, _)| c.y <= 1));

        let n = neighbors(Coord::new(15, 9), 20, 10);
        assert_eq!(cost_to(&n, Coord::new(5, 9)), Some(CARDINAL_COST));
    }

    #[test]
    fn test_corners() {
        for corner in [
            Coord::new(0, 0),
            Coord::new(0, 9),
            Coord::new(19, 0),
            Coord::new(19, 9),
        ] {
            let n = neighbors(corner, 20, 10);
            assert_eq!(n.len(), 8, "corner {corner}");
            let antipode = Coord::new((corner.x + 10) % 20, corner.y);
            assert_eq!(cost_to(&n, antipode), Some(CARDINAL_COST));
        }
    }

    #[test]
    fn test_tiny_grid_has_no_self_loops() {
        for y in 0..1 {
            for x in 0..2 {
                let c = Coord::new(x, y);
                let n = neighbors(c, 2, 1);
                assert!(n.iter().all(|(other, _)| *other != c));
                assert_eq!(n.len(), 1);
                assert!((n[0].1 - CARDINAL_COST).abs() < f64::EPSILON);
            }
        }
    }
}
