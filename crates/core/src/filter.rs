//! Spatial, temporal and text filtering of photo collections
//!
//! A [`FilterSpec`] is an immutable description of constraints. Each field is
//! optional, an absent field places no constraint, and present fields combine
//! with logical AND. Filtering preserves the input order.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use dronemap_core::{filter_photos, FilterSpec, PhotoRecord};
//! use dronemap_geo::BoundingBox;
//!
//! let t = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
//! let photos = vec![
//!     PhotoRecord::new("inside", 44.5, -122.5, t),
//!     PhotoRecord::new("outside", 46.0, -122.5, t),
//! ];
//!
//! let spec = FilterSpec::new().with_bounding_box(BoundingBox::new(45.0, 44.0, -122.0, -123.0));
//! let matched = filter_photos(&photos, &spec);
//! assert_eq!(matched.len(), 1);
//! assert_eq!(matched[0].id, "inside");
//! ```

use chrono::{DateTime, Utc};
use dronemap_geo::{haversine_distance, BoundingBox, Coordinate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::photo::{PhotoRecord, DISPLAY_DATE_FORMAT};

/// Photos within `radius_km` of `center`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusQuery {
    /// Circle center
    pub center: Coordinate,
    /// Circle radius in kilometers, inclusive
    pub radius_km: f64,
}

impl RadiusQuery {
    /// Circle of `radius_km` around `center`
    pub fn new(center: Coordinate, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Inclusive great-circle containment
    pub fn contains(&self, coord: &Coordinate) -> bool {
        haversine_distance(&self.center, coord) <= self.radius_km
    }
}

/// Constraints applied by [`filter_photos`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring searched in id, coordinates, altitude, camera, date and place
    pub text_query: Option<String>,
    /// Inclusive lower altitude bound in meters; unknown altitudes fail it
    pub altitude_min: Option<f64>,
    /// Inclusive upper altitude bound in meters; unknown altitudes fail it
    pub altitude_max: Option<f64>,
    /// Inclusive latitude/longitude box
    pub bounding_box: Option<BoundingBox>,
    /// Great-circle radius around a point
    pub radius_query: Option<RadiusQuery>,
    /// Inclusive lower bound on capture time
    pub date_start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on capture time
    pub date_end: Option<DateTime<Utc>>,
}

impl FilterSpec {
    /// An unconstrained spec that matches every locatable photo
    pub fn new() -> Self {
        Self::default()
    }

    /// Search text; a blank query places no constraint
    #[must_use]
    pub fn with_text(mut self, query: impl Into<String>) -> Self {
        self.text_query = Some(query.into());
        self
    }

    /// Replace both altitude bounds
    #[must_use]
    pub fn with_altitude_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.altitude_min = min;
        self.altitude_max = max;
        self
    }

    /// Restrict to `bbox`
    #[must_use]
    pub fn with_bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Restrict to `radius_km` around `center`
    #[must_use]
    pub fn with_radius(mut self, center: Coordinate, radius_km: f64) -> Self {
        self.radius_query = Some(RadiusQuery::new(center, radius_km));
        self
    }

    /// Replace both capture-time bounds
    #[must_use]
    pub fn with_date_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_start = start;
        self.date_end = end;
        self
    }

    /// True if no dimension constrains the result
    pub fn is_unconstrained(&self) -> bool {
        self.normalized_query().is_none()
            && self.altitude_min.is_none()
            && self.altitude_max.is_none()
            && self.bounding_box.is_none()
            && self.radius_query.is_none()
            && self.date_start.is_none()
            && self.date_end.is_none()
    }

    /// Lower-cased query; whitespace only decides blankness and is otherwise matched as typed
    fn normalized_query(&self) -> Option<String> {
        self.text_query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Evaluate every constraint against one photo.
    ///
    /// Photos without a position or timestamp never match.
    pub fn matches(&self, photo: &PhotoRecord) -> bool {
        self.matcher().matches(photo)
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            spec: self,
            query: self.normalized_query(),
        }
    }
}

/// A spec with its text query normalised once per filtering pass
struct Matcher<'a> {
    spec: &'a FilterSpec,
    query: Option<String>,
}

impl Matcher<'_> {
    fn matches(&self, photo: &PhotoRecord) -> bool {
        let Some((position, timestamp)) = photo.fix() else {
            return false;
        };
        self.matches_text(photo, &position, &timestamp)
            && self.matches_altitude(photo.altitude)
            && self.matches_region(&position)
            && self.matches_dates(&timestamp)
    }

    fn matches_text(&self, photo: &PhotoRecord, position: &Coordinate, timestamp: &DateTime<Utc>) -> bool {
        let Some(query) = &self.query else {
            return true;
        };
        let fields = [
            photo.id.clone(),
            format!("{:.6} {:.6}", position.latitude, position.longitude),
            photo.altitude.map(|a| a.to_string()).unwrap_or_default(),
            photo.camera(),
            timestamp.format(DISPLAY_DATE_FORMAT).to_string(),
            photo.location_name.clone().unwrap_or_default(),
        ];
        fields.iter().any(|field| field.to_lowercase().contains(query.as_str()))
    }

    fn matches_altitude(&self, altitude: Option<f64>) -> bool {
        let (min, max) = (self.spec.altitude_min, self.spec.altitude_max);
        if min.is_none() && max.is_none() {
            return true;
        }
        // Unknown altitude cannot satisfy a bound
        let Some(altitude) = altitude else {
            return false;
        };
        min.map_or(true, |min| altitude >= min) && max.map_or(true, |max| altitude <= max)
    }

    fn matches_region(&self, position: &Coordinate) -> bool {
        self.spec.bounding_box.map_or(true, |bbox| bbox.contains(position))
            && self.spec.radius_query.map_or(true, |q| q.contains(position))
    }

    fn matches_dates(&self, timestamp: &DateTime<Utc>) -> bool {
        self.spec.date_start.map_or(true, |start| *timestamp >= start)
            && self.spec.date_end.map_or(true, |end| *timestamp <= end)
    }
}

/// Return the photos matching every constraint of `spec`, in input order.
pub fn filter_photos<'a>(photos: &'a [PhotoRecord], spec: &FilterSpec) -> Vec<&'a PhotoRecord> {
    let matcher = spec.matcher();
    let matched: Vec<&PhotoRecord> = photos.iter().filter(|p| matcher.matches(p)).collect();

    debug!(
        total = photos.len(),
        matched = matched.len(),
        unconstrained = spec.is_unconstrained(),
        "filtered photos"
    );

    matched
}
