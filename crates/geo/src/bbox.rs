//! Latitude/longitude bounding boxes.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in degree space, edges inclusive.
///
/// Boxes crossing the antimeridian (`west > east`) are not unwrapped and
/// therefore contain no points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Northern edge latitude
    pub north: f64,
    /// Southern edge latitude
    pub south: f64,
    /// Eastern edge longitude
    pub east: f64,
    /// Western edge longitude
    pub west: f64,
}

impl BoundingBox {
    /// Creates a new bounding box.
    #[inline]
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// Returns true if `south <= lat <= north` and `west <= lng <= east`.
    #[inline]
    pub fn contains(&self, coord: &Coordinate) -> bool {
        self.south <= coord.latitude
            && coord.latitude <= self.north
            && self.west <= coord.longitude
            && coord.longitude <= self.east
    }

    /// Returns true if the box spans the antimeridian and will match nothing.
    #[inline]
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }
}
