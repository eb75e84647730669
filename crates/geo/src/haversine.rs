//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes. NaN inputs propagate to the
//! result; nothing here is range-checked.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Converts degrees to radians (`degrees * π / 180`).
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance in kilometers between two `(lat, lon)` pairs given in degrees.
///
/// # Example
/// ```
/// use dronemap_geo::haversine_distance_km;
///
/// let d = haversine_distance_km(0.0, 0.0, 0.0, 0.003);
/// assert!((d - 0.3336).abs() < 0.001);
/// ```
#[inline]
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_distance(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2))
}

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// # Example
/// ```
/// use dronemap_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two coordinates in meters.
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Test data: known distances between cities
    const BERLIN: Coordinate = Coordinate { latitude: 52.5200, longitude: 13.4050 };
    const PARIS: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };
    const NEW_YORK: Coordinate = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    const TOKYO: Coordinate = Coordinate { latitude: 35.6762, longitude: 139.6503 };

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        // Expected: ~878 km
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let distance = haversine_distance(&NEW_YORK, &TOKYO);
        // Expected: ~10,838 km
        assert!((distance - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(haversine_distance(&BERLIN, &BERLIN), 0.0);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&BERLIN, &PARIS);
        let meters = haversine_distance_meters(&BERLIN, &PARIS);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_scalar_form_matches_coordinate_form() {
        let scalar = haversine_distance_km(10.0, 10.0, 11.0, 11.0);
        let coords = haversine_distance(&Coordinate::new(10.0, 10.0), &Coordinate::new(11.0, 11.0));
        assert_eq!(scalar, coords);
        // ~155 km between (10,10) and (11,11)
        assert!(scalar > 100.0 && scalar < 200.0);
    }

    #[test]
    fn test_to_radians() {
        assert_eq!(to_radians(180.0), std::f64::consts::PI);
        assert_eq!(to_radians(0.0), 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_distance_km(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }

    #[test]
    fn test_monotonic_along_meridian() {
        let origin = Coordinate::new(0.0, 0.0);
        let mut previous = 0.0;
        for step in 1..=10 {
            let d = haversine_distance(&origin, &Coordinate::new(f64::from(step), 0.0));
            assert!(d > previous);
            previous = d;
        }
    }

    proptest! {
        #[test]
        fn prop_symmetric(
            lat1 in -90.0f64..=90.0, lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lon2 in -180.0f64..=180.0,
        ) {
            let a = haversine_distance_km(lat1, lon1, lat2, lon2);
            let b = haversine_distance_km(lat2, lon2, lat1, lon1);
            prop_assert!((a - b).abs() < 1e-9);
        }

        #[test]
        fn prop_zero_for_identical_points(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert_eq!(haversine_distance_km(lat, lon, lat, lon), 0.0);
        }
    }
}
