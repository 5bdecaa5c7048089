//! # Geodesic maths
//!
//! Bearing and distance between the vehicle's position fix and a waypoint. Positions are held in
//! radians, bearings are returned in degrees clockwise from north.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::Serialize;
use util::maths::rem_euclid;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Mean radius of the Earth.
///
/// Units: meters
pub const EARTH_RADIUS_M: f64 = 6_371_008.7714;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A target position the vehicle shall drive to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Waypoint {
    /// Units: radians
    pub latitude_rad: f64,

    /// Units: radians
    pub longitude_rad: f64,
}

/// Most recent position reported by the GNSS receiver.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct VehicleFix {
    /// Units: radians
    pub latitude_rad: f64,

    /// Units: radians
    pub longitude_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Waypoint {
    /// Create a new waypoint from a latitude and longitude in degrees.
    pub fn from_deg(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_rad: latitude_deg.to_radians(),
            longitude_rad: longitude_deg.to_radians(),
        }
    }
}

impl VehicleFix {
    /// Create a new fix from a latitude and longitude in degrees.
    pub fn from_deg(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_rad: latitude_deg.to_radians(),
            longitude_rad: longitude_deg.to_radians(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Initial great-circle bearing from the fix to the waypoint.
///
/// Units: degrees, in the range [0, 360)
pub fn bearing_deg(from: &VehicleFix, to: &Waypoint) -> f64 {
    let d_lon = to.longitude_rad - from.longitude_rad;

    let y = to.latitude_rad.cos() * d_lon.sin();
    let x = from.latitude_rad.cos() * to.latitude_rad.sin()
        - from.latitude_rad.sin() * to.latitude_rad.cos() * d_lon.cos();

    let bearing = rem_euclid(y.atan2(x).to_degrees() + 360.0, 360.0);

    // Round-off in rem_euclid can land exactly on the upper bound
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Distance between the fix and the waypoint using the equirectangular approximation.
///
/// The latitude and longitude differences are scaled by the Earth's radius and treated as
/// orthogonal planar displacements. Only valid over short ranges.
///
/// Units: meters
pub fn planar_distance_m(from: &VehicleFix, to: &Waypoint, earth_radius_m: f64) -> f64 {
    let d_lat_m = (to.latitude_rad - from.latitude_rad) * earth_radius_m;
    let d_lon_m = (to.longitude_rad - from.longitude_rad) * earth_radius_m;

    d_lat_m.hypot(d_lon_m)
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bearing_cardinals() {
        let origin = VehicleFix::from_deg(0.0, 0.0);

        let north = bearing_deg(&origin, &Waypoint::from_deg(1.0, 0.0));
        let east = bearing_deg(&origin, &Waypoint::from_deg(0.0, 1.0));
        let south = bearing_deg(&origin, &Waypoint::from_deg(-1.0, 0.0));
        let west = bearing_deg(&origin, &Waypoint::from_deg(0.0, -1.0));

        assert!(north.abs() < 1e-9);
        assert!((east - 90.0).abs() < 1e-9);
        assert!((south - 180.0).abs() < 1e-9);
        assert!((west - 270.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_range() {
        let fix = VehicleFix::from_deg(52.2053, 0.1218);

        for lat_step in -10..=10 {
            for lon_step in -10..=10 {
                if lat_step == 0 && lon_step == 0 {
                    continue;
                }

                let wp = Waypoint::from_deg(
                    52.2053 + (lat_step as f64) * 1e-4,
                    0.1218 + (lon_step as f64) * 1e-4,
                );
                let b = bearing_deg(&fix, &wp);

                assert!(b >= 0.0 && b < 360.0, "bearing {} out of range", b);
            }
        }
    }

    #[test]
    fn test_planar_distance() {
        let fix = VehicleFix::from_deg(10.0, 20.0);

        // Same point
        assert!(planar_distance_m(&fix, &Waypoint::from_deg(10.0, 20.0), EARTH_RADIUS_M) < 1e-9);

        // One arc-second of latitude is roughly 30.9 m
        let d = planar_distance_m(
            &fix,
            &Waypoint::from_deg(10.0 + 1.0 / 3600.0, 20.0),
            EARTH_RADIUS_M,
        );
        assert!((d - 30.887).abs() < 0.01, "distance was {}", d);

        // Latitude and longitude displacements are orthogonal
        let d = planar_distance_m(
            &VehicleFix { latitude_rad: 0.0, longitude_rad: 0.0 },
            &Waypoint { latitude_rad: 3e-6, longitude_rad: 4e-6 },
            1e6,
        );
        assert!((d - 5.0).abs() < 1e-9);
    }
}
