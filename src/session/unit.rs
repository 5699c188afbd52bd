//! Units on the map.

use crate::graph::Layer;
use crate::map::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a unit, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a unit is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// A static base. Always on land.
    Base,
    /// A mobile unit restricted to one terrain layer.
    Mobile(Layer),
}

impl UnitKind {
    /// Map glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Base => '#',
            Self::Mobile(_) => '@',
        }
    }

    /// Layer the unit must stand on.
    #[must_use]
    pub const fn layer(self) -> Layer {
        match self {
            Self::Base => Layer::Land,
            Self::Mobile(layer) => layer,
        }
    }
}

/// A unit owned by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Identifier.
    pub id: UnitId,
    /// Owning player's seat number.
    pub owner: u8,
    /// Kind of unit.
    pub kind: UnitKind,
    /// Current tile.
    pub position: Coord,
    /// Dead units stay in place until the next cleanup.
    pub alive: bool,
}

impl Unit {
    /// Whether the unit can be ordered to move.
    #[must_use]
    pub const fn is_mobile(&self) -> bool {
        self.alive && matches!(self.kind, UnitKind::Mobile(_))
    }
}
