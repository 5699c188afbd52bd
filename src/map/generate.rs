//! Procedural world generation.

use super::{Coord, GameMap, Tile};
use crate::config::WorldConfig;
use crate::error::MapError;
use crate::field::{NoiseField, PerlinField};
use crate::geo::{grid_to_lat_long, spherical_to_cartesian};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Offset added to the world seed to seed the resource field.
pub const RESOURCE_SEED_OFFSET: u32 = 0x9E37_79B9;

/// A land tile rich enough to host a resource deposit.
///
/// Generation only reports sites; placing anything on them is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSite {
    /// Tile position.
    pub coord: Coord,
    /// Sampled resource density.
    pub density: f64,
}

/// Generate a world from its configuration using Perlin noise.
///
/// The same configuration always yields the same map.
///
/// # Errors
///
/// Returns an error if the configuration is invalid (for example an odd or
/// zero width).
pub fn generate_map(config: &WorldConfig) -> Result<(GameMap, Vec<ResourceSite>), MapError> {
    config.validate()?;
    let terrain = PerlinField::new(config.seed, config.detail);
    let resources = config
        .resources
        .then(|| PerlinField::new(config.seed.wrapping_add(RESOURCE_SEED_OFFSET), 1));
    generate_with(
        config,
        &terrain,
        resources.as_ref().map(|f| f as &dyn NoiseField),
    )
}

/// Generate a world from explicit noise fields.
///
/// Each tile's latitude and longitude are projected onto a sphere of radius
/// `landmass_size` and the terrain field is sampled there with `detail`
/// octaves. Land tiles are then sampled from `resources` (if given) on a
/// sphere of radius `resource_distribution`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn generate_with(
    config: &WorldConfig,
    terrain: &dyn NoiseField,
    resources: Option<&dyn NoiseField>,
) -> Result<(GameMap, Vec<ResourceSite>), MapError> {
    config.validate()?;
    let started = Instant::now();
    let (width, height) = (config.width, config.height());

    let mut tiles = Vec::with_capacity(usize::from(width) * usize::from(height));
    let mut sites = Vec::new();
    for y in 0..height {
        for x in 0..width {
            let coord = Coord::new(x, y);
            let (latitude, longitude) = grid_to_lat_long(coord, width, height);
            let point = spherical_to_cartesian(latitude, longitude, config.landmass_size);
            let elevation = terrain.sample_fbm(point, config.detail);

            let density = match resources {
                Some(field) if elevation > 0.0 => {
                    let point =
                        spherical_to_cartesian(latitude, longitude, config.resource_distribution);
                    field.sample(point)
                }
                _ => 0.0,
            };

            let tile = Tile::new(coord, latitude, longitude, elevation, density);
            if tile.is_land() && tile.resource_density() > config.resource_threshold {
                sites.push(ResourceSite {
                    coord,
                    density: tile.resource_density(),
                });
            }
            tiles.push(tile);
        }
    }

    let map = GameMap::from_tiles(*config, tiles)?;
    info!(
        width,
        height,
        seed = config.seed,
        land_fraction = map.land_fraction(),
        resource_sites = sites.len(),
        elapsed = ?started.elapsed(),
        "generated world"
    );
    Ok((map, sites))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FnField;

    #[test]
    fn test_rejects_odd_width() {
        let err = generate_map(&WorldConfig::new(9, 0)).unwrap_err();
        assert_eq!(err, MapError::InvalidWidth(9));
    }

    #[test]
    fn test_rejects_zero_width() {
        let err = generate_map(&WorldConfig::new(0, 0)).unwrap_err();
        assert_eq!(err, MapError::InvalidWidth(0));
    }

    #[test]
    fn test_deterministic() {
        let config = WorldConfig::new(24, 77);
        let (a, sites_a) = generate_map(&config).unwrap();
        let (b, sites_b) = generate_map(&config).unwrap();
        assert_eq!(a.tiles(), b.tiles());
        assert_eq!(sites_a, sites_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let (a, _) = generate_map(&WorldConfig::new(24, 1)).unwrap();
        let (b, _) = generate_map(&WorldConfig::new(24, 2)).unwrap();
        assert_ne!(a.tiles(), b.tiles());
    }

    #[test]
    fn test_dimensions() {
        let (map, _) = generate_map(&WorldConfig::new(16, 3)).unwrap();
        assert_eq!(map.width(), 16);
        assert_eq!(map.height(), 8);
        assert_eq!(map.tiles().len(), 128);
        assert_eq!(map.tiles()[17].coord(), Coord::new(1, 1));
    }

    #[test]
    fn test_resource_sites_only_on_rich_land() {
        let config = WorldConfig {
            resource_threshold: 0.5,
            ..WorldConfig::new(16, 0)
        };
        let terrain = FnField::new(|[x, _, _]: [f64; 3]| x);
        let resources = FnField::new(|[_, _, z]: [f64; 3]| z / 8.0);
        let (map, sites) = generate_with(&config, &terrain, Some(&resources)).unwrap();
        assert!(!sites.is_empty());
        for site in &sites {
            let tile = map.get(site.coord).unwrap();
            assert!(tile.is_land());
            assert!(site.density > 0.5);
        }
        let expected = map
            .tiles()
            .iter()
            .filter(|t| t.resource_density() > 0.5)
            .count();
        assert_eq!(sites.len(), expected);
    }

    #[test]
    fn test_no_resources_without_field() {
        let config = WorldConfig::new(16, 0);
        let terrain = FnField::new(|_| 0.5);
        let (map, sites) = generate_with(&config, &terrain, None).unwrap();
        assert!(sites.is_empty());
        assert!(map.tiles().iter().all(|t| t.resource_density().abs() < f64::EPSILON));
    }
}
