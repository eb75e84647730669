//! Parsing of coordinates and bounding boxes from comma-separated text.
//!
//! Supported formats:
//! - Coordinate: `"44.5,-122.5"` (latitude first)
//! - Bounding box: `"45,44,-122,-123"` (north, south, east, west)
//!
//! Whitespace around fields is ignored.

use crate::{BoundingBox, Coordinate, GeoError, Result};
use std::str::FromStr;

fn parse_fields<const N: usize>(input: &str) -> Result<[f64; N]> {
    let parts: Vec<&str> = input.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(GeoError::FieldCount {
            expected: N,
            found: parts.len(),
            input: input.to_string(),
        });
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part.parse::<f64>().map_err(|source| GeoError::InvalidNumber {
            value: part.to_string(),
            source,
        })?;
    }
    Ok(out)
}

impl FromStr for Coordinate {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let [lat, lng] = parse_fields::<2>(s)?;
        let coord = Coordinate::new(lat, lng);
        if !coord.is_valid() {
            return Err(GeoError::InvalidCoordinate(format!(
                "{} is outside [-90,90] x [-180,180]",
                s.trim()
            )));
        }
        Ok(coord)
    }
}

impl FromStr for BoundingBox {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self> {
        let [north, south, east, west] = parse_fields::<4>(s)?;
        if south > north {
            return Err(GeoError::InvalidCoordinate(format!(
                "south edge {south} is above north edge {north}"
            )));
        }
        Ok(BoundingBox::new(north, south, east, west))
    }
}
