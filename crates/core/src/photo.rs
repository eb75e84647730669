//! Photo records as handed over by the import collaborator
//!
//! A record is immutable once built; the algorithms in this crate only read
//! and re-group records. Latitude, longitude and timestamp are optional at the
//! type level because records arrive from untrusted JSON, and every algorithm
//! re-checks [`PhotoRecord::is_locatable`] before using one.

use chrono::{DateTime, Utc};
use dronemap_geo::Coordinate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ResultExt};

/// Format used when rendering timestamps for display and text search
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A geotagged drone photograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    /// Unique identifier within a collection
    pub id: String,
    /// Latitude in degrees
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude in degrees
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Altitude in meters; `None` means unknown, which is distinct from zero
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Capture time
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Camera manufacturer from EXIF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_make: Option<String>,
    /// Camera model from EXIF
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_model: Option<String>,
    /// Display label from reverse geocoding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    /// File size, for reporting only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl PhotoRecord {
    /// Create a locatable record with no optional metadata
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: None,
            timestamp: Some(timestamp),
            camera_make: None,
            camera_model: None,
            location_name: None,
            size_bytes: None,
        }
    }

    /// Set the altitude in meters
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Set camera make and model
    pub fn with_camera(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.camera_make = Some(make.into());
        self.camera_model = Some(model.into());
        self
    }

    /// Set the reverse-geocoded label
    pub fn with_location_name(mut self, name: impl Into<String>) -> Self {
        self.location_name = Some(name.into());
        self
    }

    /// Set the file size
    pub fn with_size_bytes(mut self, size: u64) -> Self {
        self.size_bytes = Some(size);
        self
    }

    /// The record's position, if both latitude and longitude are present and finite
    pub fn position(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Some(Coordinate::new(lat, lng))
            }
            _ => None,
        }
    }

    /// True if the record has a position and a timestamp
    pub fn is_locatable(&self) -> bool {
        self.position().is_some() && self.timestamp.is_some()
    }

    /// Position and timestamp together, for records that pass [`Self::is_locatable`]
    pub(crate) fn fix(&self) -> Option<(Coordinate, DateTime<Utc>)> {
        Some((self.position()?, self.timestamp?))
    }

    /// `"{make} {model}"` with missing parts left out
    pub fn camera(&self) -> String {
        [self.camera_make.as_deref(), self.camera_model.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse a JSON array of photo records
pub fn parse_photos(json: &str) -> Result<Vec<PhotoRecord>> {
    let photos: Vec<PhotoRecord> =
        serde_json::from_str(json).map_err(crate::Error::from).context("While reading photo records")?;
    Ok(photos)
}
