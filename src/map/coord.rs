//! Grid coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tile position on the world grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coord {
    /// Column, `0..width`.
    pub x: u16,
    /// Row, `0..height`.
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Row-major index of this coordinate in a grid of the given width.
    #[must_use]
    #[inline]
    pub const fn index(self, width: u16) -> usize {
        self.y as usize * width as usize + self.x as usize
    }

    /// Whether this coordinate lies inside a `width` x `height` grid.
    #[must_use]
    pub const fn in_bounds(self, width: u16, height: u16) -> bool {
        self.x < width && self.y < height
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Error returned when parsing a coordinate from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCoordError {
    input: String,
}

impl fmt::Display for ParseCoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a coordinate like `12,34`, got `{}`", self.input)
    }
}

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parse `x,y`, with optional surrounding parentheses and spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError {
            input: s.to_string(),
        };
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let (x, y) = inner.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_row_major() {
        assert_eq!(Coord::new(0, 0).index(8), 0);
        assert_eq!(Coord::new(3, 0).index(8), 3);
        assert_eq!(Coord::new(3, 2).index(8), 19);
    }

    #[test]
    fn test_in_bounds() {
        assert!(Coord::new(7, 3).in_bounds(8, 4));
        assert!(!Coord::new(8, 3).in_bounds(8, 4));
        assert!(!Coord::new(0, 4).in_bounds(8, 4));
    }

    #[test]
    fn test_parse() {
        assert_eq!("3,4".parse::<Coord>().unwrap(), Coord::new(3, 4));
        assert_eq!(" (10, 2) ".parse::<Coord>().unwrap(), Coord::new(10, 2));
        assert!("3".parse::<Coord>().is_err());
        assert!("a,b".parse::<Coord>().is_err());
        assert!("-1,2".parse::<Coord>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Coord::new(5, 9).to_string(), "(5, 9)");
    }
}
