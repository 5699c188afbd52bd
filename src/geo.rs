//! Coordinate math between the grid, latitude/longitude and 3D space.

use crate::map::Coord;

/// Project a latitude/longitude (degrees) onto a sphere of the given radius.
///
/// Uses the physics convention with colatitude `90 - latitude`, so the north
/// pole maps to `+z`.
#[must_use]
pub fn spherical_to_cartesian(latitude: f64, longitude: f64, radius: f64) -> [f64; 3] {
    let theta = (90.0 - latitude).to_radians();
    let phi = longitude.to_radians();
    [
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    ]
}

/// Latitude and longitude of a grid tile, in degrees.
///
/// Row 0 sits at latitude -90 and column 0 at longitude -180.
#[must_use]
pub fn grid_to_lat_long(coord: Coord, width: u16, height: u16) -> (f64, f64) {
    let latitude = f64::from(coord.y) * 180.0 / f64::from(height) - 90.0;
    let longitude = f64::from(coord.x) * 360.0 / f64::from(width) - 180.0;
    (latitude, longitude)
}

/// Great-circle distance between two tiles on a sphere of the given radius.
#[must_use]
pub fn surface_distance(a: Coord, b: Coord, width: u16, height: u16, radius: f64) -> f64 {
    let (la1, lo1) = grid_to_lat_long(a, width, height);
    let (la2, lo2) = grid_to_lat_long(b, width, height);
    let (la1, la2) = (la1.to_radians(), la2.to_radians());
    let dlat = la2 - la1;
    let dlon = (lo2 - lo1).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + la1.cos() * la2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * radius * h.sqrt().min(1.0).asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_north_pole_is_positive_z() {
        let [x, y, z] = spherical_to_cartesian(90.0, 0.0, 2.0);
        assert!(close(x, 0.0));
        assert!(close(y, 0.0));
        assert!(close(z, 2.0));
    }

    #[test]
    fn test_equator_prime_meridian_is_positive_x() {
        let [x, y, z] = spherical_to_cartesian(0.0, 0.0, 3.0);
        assert!(close(x, 3.0));
        assert!(close(y, 0.0));
        assert!(close(z, 0.0));
    }

    #[test]
    fn test_antimeridian_seam_is_continuous() {
        let a = spherical_to_cartesian(10.0, -180.0, 1.0);
        let b = spherical_to_cartesian(10.0, 180.0, 1.0);
        for i in 0..3 {
            assert!(close(a[i], b[i]));
        }
    }

    #[test]
    fn test_points_lie_on_sphere() {
        for (la, lo) in [(12.5, -33.0), (-80.0, 170.0), (45.0, 45.0)] {
            let [x, y, z] = spherical_to_cartesian(la, lo, 5.0);
            assert!(close((x * x + y * y + z * z).sqrt(), 5.0));
        }
    }

    #[test]
    fn test_grid_to_lat_long_corners() {
        let (la, lo) = grid_to_lat_long(Coord::new(0, 0), 180, 90);
        assert!(close(la, -90.0));
        assert!(close(lo, -180.0));
        let (la, lo) = grid_to_lat_long(Coord::new(90, 45), 180, 90);
        assert!(close(la, 0.0));
        assert!(close(lo, 0.0));
    }

    #[test]
    fn test_surface_distance_half_circumference() {
        let d = surface_distance(Coord::new(0, 45), Coord::new(90, 45), 180, 90, 1.0);
        assert!(close(d, std::f64::consts::PI));
    }
}
