//! Tiles and elevation bands.

use super::Coord;
use serde::{Deserialize, Serialize};

/// A 24-bit display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Terrain class of a tile, derived from its elevation.
///
/// Bands are checked from highest to lowest; each covers `(min, max]`
/// except [`ElevationBand::DeepSea`], which also includes `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElevationBand {
    /// `(0.8, 1]`
    HighMountain,
    /// `(0.6, 0.8]`
    MidHigh,
    /// `(0.4, 0.6]`
    Mid,
    /// `(0.2, 0.4]`
    MidLow,
    /// `(0, 0.2]`
    LowLand,
    /// `(-0.5, 0]`
    Sea,
    /// `[-1, -0.5]`
    DeepSea,
}

impl ElevationBand {
    /// All bands in lookup order.
    pub const ALL: [Self; 7] = [
        Self::HighMountain,
        Self::MidHigh,
        Self::Mid,
        Self::MidLow,
        Self::LowLand,
        Self::Sea,
        Self::DeepSea,
    ];

    /// Classify an elevation. Values outside `[-1, 1]` are clamped first.
    #[must_use]
    pub fn classify(elevation: f64) -> Self {
        let elevation = elevation.clamp(-1.0, 1.0);
        Self::ALL
            .into_iter()
            .find(|band| band.contains(elevation))
            .unwrap_or(Self::DeepSea)
    }

    /// `(max, min)` bounds of the band.
    #[must_use]
    pub const fn range(self) -> (f64, f64) {
        match self {
            Self::HighMountain => (1.0, 0.8),
            Self::MidHigh => (0.8, 0.6),
            Self::Mid => (0.6, 0.4),
            Self::MidLow => (0.4, 0.2),
            Self::LowLand => (0.2, 0.0),
            Self::Sea => (0.0, -0.5),
            Self::DeepSea => (-0.5, -1.0),
        }
    }

    /// Whether `elevation` falls inside this band.
    #[must_use]
    pub fn contains(self, elevation: f64) -> bool {
        let (max, min) = self.range();
        match self {
            Self::DeepSea => max >= elevation && elevation >= min,
            _ => max >= elevation && elevation > min,
        }
    }

    /// Map glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::HighMountain => 'A',
            Self::MidHigh => 'a',
            Self::Mid => 'n',
            Self::MidLow | Self::LowLand => '8',
            Self::Sea => 'S',
            Self::DeepSea => 's',
        }
    }

    /// Map colour.
    #[must_use]
    pub const fn color(self) -> Rgb {
        match self {
            Self::HighMountain => Rgb::new(202, 163, 85),
            Self::MidHigh => Rgb::new(145, 162, 78),
            Self::Mid => Rgb::new(129, 162, 76),
            Self::MidLow => Rgb::new(82, 162, 71),
            Self::LowLand => Rgb::new(49, 162, 67),
            Self::Sea => Rgb::new(50, 50, 220),
            Self::DeepSea => Rgb::new(0, 0, 150),
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HighMountain => "high mountains",
            Self::MidHigh => "highlands",
            Self::Mid => "hills",
            Self::MidLow => "uplands",
            Self::LowLand => "lowlands",
            Self::Sea => "sea",
            Self::DeepSea => "deep sea",
        }
    }

    /// Whether the band is land.
    #[must_use]
    pub const fn is_land(self) -> bool {
        !matches!(self, Self::Sea | Self::DeepSea)
    }
}

/// One cell of the world grid.
///
/// Tiles are immutable once generated; adjacency lives in the map's graphs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    coord: Coord,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    resource_density: f64,
    band: ElevationBand,
}

/// Metres represented by an elevation of 1.0.
pub const ELEVATION_SCALE_M: f64 = 4000.0;

impl Tile {
    /// Create a tile, clamping elevation into `[-1, 1]` and classifying it.
    ///
    /// Resource density is only kept on land; sea tiles always carry 0.
    #[must_use]
    pub fn new(
        coord: Coord,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        resource_density: f64,
    ) -> Self {
        let elevation = elevation.clamp(-1.0, 1.0);
        let resource_density = if elevation > 0.0 {
            resource_density
        } else {
            0.0
        };
        Self {
            coord,
            latitude,
            longitude,
            elevation,
            resource_density,
            band: ElevationBand::classify(elevation),
        }
    }

    /// Grid position.
    #[must_use]
    pub const fn coord(&self) -> Coord {
        self.coord
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in `[-1, 1]`.
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Resource density; 0 for sea tiles.
    #[must_use]
    pub const fn resource_density(&self) -> f64 {
        self.resource_density
    }

    /// Elevation band.
    #[must_use]
    pub const fn band(&self) -> ElevationBand {
        self.band
    }

    /// Whether the tile is land (`elevation > 0`).
    #[must_use]
    pub fn is_land(&self) -> bool {
        self.elevation > 0.0
    }

    /// Display glyph.
    #[must_use]
    pub const fn glyph(&self) -> char {
        self.band.glyph()
    }

    /// Display colour.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.band.color()
    }

    /// Height above sea level in metres, or `None` at sea.
    #[must_use]
    pub fn altitude_m(&self) -> Option<f64> {
        self.is_land().then(|| self.elevation * ELEVATION_SCALE_M)
    }

    /// Whether the stored fields agree with each other.
    pub(crate) fn is_consistent(&self) -> bool {
        (-1.0..=1.0).contains(&self.elevation)
            && self.band == ElevationBand::classify(self.elevation)
            && (self.is_land() || self.resource_density.abs() < f64::EPSILON)
    }
}
