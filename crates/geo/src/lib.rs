//! Geospatial math for dronemap.
//!
//! This crate provides:
//! - Haversine great-circle distance (kilometers and meters)
//! - Inclusive latitude/longitude bounding boxes
//! - Parsing of `"lat,lng"` and `"north,south,east,west"` strings
//! - Batch distance calculations with optional parallelism
//!
//! # Example
//!
//! ```
//! use dronemap_geo::{haversine_distance, Coordinate};
//!
//! let coord1 = Coordinate::new(52.5200, 13.4050); // Berlin
//! let coord2 = Coordinate::new(48.8566, 2.3522);  // Paris
//!
//! let distance_km = haversine_distance(&coord1, &coord2);
//! assert!((distance_km - 878.0).abs() < 10.0); // ~878 km
//! ```

mod bbox;
mod error;
mod haversine;
mod parse;
pub mod batch;

pub use batch::distances_from;
pub use bbox::BoundingBox;
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{
    haversine_distance, haversine_distance_km, haversine_distance_meters, to_radians,
    EARTH_RADIUS_KM, EARTH_RADIUS_M,
};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// Values are not range-checked; see [`Coordinate::is_valid`].
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate lies within the valid degree ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns `(latitude, longitude)` in radians.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (to_radians(self.latitude), to_radians(self.longitude))
    }

    /// Returns the coordinate as a `(lat, lng)` pair.
    #[inline]
    pub fn as_pair(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(52.5200, 13.4050);
        assert_eq!(coord.latitude, 52.5200);
        assert_eq!(coord.longitude, 13.4050);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (44.5, -122.5).into();
        assert_eq!(coord.as_pair(), (44.5, -122.5));
    }

    #[test]
    fn test_display_uses_six_decimals() {
        assert_eq!(Coordinate::new(10.0, -0.5).to_string(), "10.000000,-0.500000");
    }
}
