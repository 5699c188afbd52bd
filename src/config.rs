//! World generation parameters.
//!
//! A [`WorldConfig`] fully determines a generated map: the same configuration
//! always produces the same tiles. Configurations can be loaded from YAML,
//! with every field optional:
//!
//! ```yaml
//! width: 180
//! seed: 42
//! landmass_size: 2.0
//! detail: 32
//! ```

use crate::error::{ConfigError, MapError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters controlling world generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in tiles. Must be even; the height is half of it.
    pub width: u16,
    /// Seed for the terrain noise field.
    pub seed: u32,
    /// Radius of the sphere used to sample terrain noise.
    ///
    /// A smaller radius covers less of the noise field, so continents look larger.
    pub landmass_size: f64,
    /// Number of fBm octaves; controls how crinkly coastlines are.
    pub detail: u32,
    /// Radius of the sphere used to sample resource noise.
    pub resource_distribution: f64,
    /// Land tiles whose resource density exceeds this value become resource sites.
    pub resource_threshold: f64,
    /// Physical radius of the world in kilometres.
    pub world_radius_km: f64,
    /// Whether to sample resource density at all.
    pub resources: bool,
}

/// Default grid width, matching a 182-column console minus its border.
pub const DEFAULT_WIDTH: u16 = 180;

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            seed: 0,
            landmass_size: 2.0,
            detail: 32,
            resource_distribution: 8.0,
            resource_threshold: 0.9,
            world_radius_km: 5000.0,
            resources: true,
        }
    }
}

impl WorldConfig {
    /// Create a default configuration with the given width and seed.
    #[must_use]
    pub fn new(width: u16, seed: u32) -> Self {
        Self {
            width,
            seed,
            ..Self::default()
        }
    }

    /// Grid height in tiles (half the width).
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.width / 2
    }

    /// Check that every parameter is in range.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidWidth`] for a zero or odd width and
    /// [`MapError::InvalidConfig`] for any other out-of-range parameter.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width < 2 || self.width % 2 != 0 {
            return Err(MapError::InvalidWidth(self.width));
        }
        if !(self.landmass_size.is_finite() && self.landmass_size > 0.0) {
            return Err(MapError::InvalidConfig("landmass_size must be positive"));
        }
        if !(self.resource_distribution.is_finite() && self.resource_distribution > 0.0) {
            return Err(MapError::InvalidConfig(
                "resource_distribution must be positive",
            ));
        }
        if !(self.world_radius_km.is_finite() && self.world_radius_km > 0.0) {
            return Err(MapError::InvalidConfig("world_radius_km must be positive"));
        }
        if !(-1.0..=1.0).contains(&self.resource_threshold) {
            return Err(MapError::InvalidConfig(
                "resource_threshold must lie in [-1, 1]",
            ));
        }
        if self.detail == 0 {
            return Err(MapError::InvalidConfig("detail must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the values are invalid.
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    /// Serialize the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
