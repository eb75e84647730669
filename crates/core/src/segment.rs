//! Flight path segmentation
//!
//! Photos are sorted by capture time and walked once. Each segment is anchored
//! on its first photo: a later photo joins the segment only while it was taken
//! within `max_time_gap` of the anchor's timestamp and within
//! `max_segment_radius_km` of the anchor's position. The anchor never moves,
//! so a slow drift cannot stretch one segment indefinitely.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use dronemap_core::{segment_into_paths, PhotoRecord, SegmentOptions};
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
//! let photos = vec![
//!     PhotoRecord::new("a", 44.500, -122.500, t0),
//!     PhotoRecord::new("b", 44.501, -122.501, t0 + chrono::Duration::minutes(5)),
//! ];
//!
//! let paths = segment_into_paths(&photos, &SegmentOptions::default());
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].photo_ids(), ["a", "b"]);
//! ```

use chrono::{DateTime, Duration, Utc};
use dronemap_geo::{haversine_distance, Coordinate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::photo::PhotoRecord;
use crate::stats::FlightStats;

/// Default time window measured from a segment's first photo
pub const DEFAULT_MAX_TIME_GAP_MINUTES: i64 = 30;

/// Default radius measured from a segment's first photo
pub const DEFAULT_MAX_SEGMENT_RADIUS_KM: f64 = 6.0;

/// Thresholds that close a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentOptions {
    /// Maximum elapsed time since the segment anchor
    pub max_time_gap: Duration,
    /// Maximum great-circle distance from the segment anchor
    pub max_segment_radius_km: f64,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            max_time_gap: Duration::minutes(DEFAULT_MAX_TIME_GAP_MINUTES),
            max_segment_radius_km: DEFAULT_MAX_SEGMENT_RADIUS_KM,
        }
    }
}

impl SegmentOptions {
    /// Override the time window
    #[must_use]
    pub fn with_max_time_gap(mut self, gap: Duration) -> Self {
        self.max_time_gap = gap;
        self
    }

    /// Override the anchor radius
    #[must_use]
    pub fn with_max_segment_radius_km(mut self, radius_km: f64) -> Self {
        self.max_segment_radius_km = radius_km;
        self
    }
}

/// One point of a flight path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    /// Source photo id
    pub photo_id: String,
    /// Photo position
    pub position: Coordinate,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

/// An inferred flight: two or more photos in capture order
///
/// Only [`segment_into_paths`] builds segments, so a segment is never empty.
/// Segments serialize for output but cannot be read back:
///
/// ```compile_fail
/// let _: dronemap_core::PathSegment = serde_json::from_str(r#"{"points":[]}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSegment {
    points: Vec<PathPoint>,
}

impl PathSegment {
    /// Points in capture order
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// `(latitude, longitude)` pairs in capture order
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| p.position.as_pair()).collect()
    }

    /// Ids of the photos in this segment, in capture order
    pub fn photo_ids(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.photo_id.as_str()).collect()
    }

    /// Number of photos (always at least two)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamp of the anchor photo
    pub fn start(&self) -> DateTime<Utc> {
        self.points[0].timestamp
    }

    /// Timestamp of the last photo
    pub fn end(&self) -> DateTime<Utc> {
        self.points[self.points.len() - 1].timestamp
    }

    /// Distance and duration summary
    pub fn stats(&self) -> FlightStats {
        FlightStats::from_fixes(self.points.iter().map(|p| (p.position, p.timestamp)))
    }
}

/// Segment currently being grown, with its fixed anchor
struct OpenSegment {
    anchor_time: DateTime<Utc>,
    anchor_position: Coordinate,
    points: Vec<PathPoint>,
}

impl OpenSegment {
    fn start(point: PathPoint) -> Self {
        Self {
            anchor_time: point.timestamp,
            anchor_position: point.position,
            points: vec![point],
        }
    }

    fn accepts(&self, point: &PathPoint, options: &SegmentOptions) -> bool {
        if point.timestamp - self.anchor_time > options.max_time_gap {
            return false;
        }
        haversine_distance(&self.anchor_position, &point.position) <= options.max_segment_radius_km
    }
}

/// Partition photos into flight path segments.
///
/// Records without a position or timestamp are skipped. Ties in timestamp keep
/// their input order. Segments with a single photo are dropped.
pub fn segment_into_paths(photos: &[PhotoRecord], options: &SegmentOptions) -> Vec<PathSegment> {
    let mut points: Vec<PathPoint> = photos
        .iter()
        .filter_map(|photo| {
            let (position, timestamp) = photo.fix()?;
            Some(PathPoint {
                photo_id: photo.id.clone(),
                position,
                timestamp,
            })
        })
        .collect();
    let valid = points.len();

    // Vec::sort_by_key is stable, which keeps same-timestamp photos in input order
    points.sort_by_key(|p| p.timestamp);

    let mut segments = Vec::new();
    let mut dropped = 0usize;
    let mut current: Option<OpenSegment> = None;

    for point in points {
        match current.as_mut() {
            Some(open) if open.accepts(&point, options) => open.points.push(point),
            _ => {
                if let Some(closed) = current.replace(OpenSegment::start(point)) {
                    close_segment(closed, &mut segments, &mut dropped);
                }
            }
        }
    }
    if let Some(closed) = current {
        close_segment(closed, &mut segments, &mut dropped);
    }

    debug!(
        input = photos.len(),
        valid,
        segments = segments.len(),
        dropped_singletons = dropped,
        "segmented photos into flight paths"
    );

    segments
}

fn close_segment(open: OpenSegment, segments: &mut Vec<PathSegment>, dropped: &mut usize) {
    if open.points.len() < 2 {
        *dropped += 1;
        return;
    }
    debug!(
        photos = open.points.len(),
        start = %open.anchor_time,
        "closed flight segment"
    );
    segments.push(PathSegment { points: open.points });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn photo(id: &str, lat: f64, lng: f64, minutes: i64) -> PhotoRecord {
        PhotoRecord::new(id, lat, lng, t0() + Duration::minutes(minutes))
    }

    fn segment(photos: &[PhotoRecord]) -> Vec<PathSegment> {
        segment_into_paths(photos, &SegmentOptions::default())
    }

    #[test]
    fn test_empty_input() {
        assert!(segment(&[]).is_empty());
    }

    #[test]
    fn test_single_photo_is_not_a_path() {
        assert!(segment(&[photo("a", 10.0, 10.0, 0)]).is_empty());
    }

    #[test]
    fn test_far_apart_photos_are_two_discarded_singletons() {
        let photos = [photo("a", 10.0, 10.0, 0), photo("b", 11.0, 11.0, 1)];
        assert!(segment(&photos).is_empty());
    }

    #[test]
    fn test_close_photos_form_one_segment_in_time_order() {
        let photos = [
            photo("c", 44.502, -122.5, 10),
            photo("a", 44.500, -122.5, 0),
            photo("b", 44.501, -122.5, 5),
        ];
        let paths = segment(&photos);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].photo_ids(), ["a", "b", "c"]);
        assert_eq!(
            paths[0].coordinates(),
            vec![(44.500, -122.5), (44.501, -122.5), (44.502, -122.5)]
        );
        assert_eq!(paths[0].start(), t0());
        assert_eq!(paths[0].end(), t0() + Duration::minutes(10));
    }

    #[test]
    fn test_time_gap_measured_from_anchor() {
        // Each step is 20 minutes, but the third photo is 40 minutes after the anchor
        let photos = [
            photo("a", 44.5, -122.5, 0),
            photo("b", 44.5, -122.5, 20),
            photo("c", 44.5, -122.5, 40),
            photo("d", 44.5, -122.5, 45),
        ];
        let paths = segment(&photos);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].photo_ids(), ["a", "b"]);
        assert_eq!(paths[1].photo_ids(), ["c", "d"]);
    }

    #[test]
    fn test_exact_time_gap_stays_in_segment() {
        let photos = [photo("a", 44.5, -122.5, 0), photo("b", 44.5, -122.5, 30)];
        assert_eq!(segment(&photos).len(), 1);
    }

    #[test]
    fn test_distance_measured_from_anchor_not_previous_photo() {
        // 0.02 degrees of latitude is ~2.2 km; each hop is small but the
        // fourth photo is ~6.7 km from the anchor
        let photos = [
            photo("a", 44.50, -122.5, 0),
            photo("b", 44.52, -122.5, 1),
            photo("c", 44.54, -122.5, 2),
            photo("d", 44.56, -122.5, 3),
            photo("e", 44.58, -122.5, 4),
        ];
        let paths = segment(&photos);
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].photo_ids(), ["a", "b", "c"]);
        assert_eq!(paths[1].photo_ids(), ["d", "e"]);
    }

    #[test]
    fn test_custom_thresholds() {
        let photos = [photo("a", 44.5, -122.5, 0), photo("b", 44.5, -122.5, 10)];
        let options = SegmentOptions::default().with_max_time_gap(Duration::minutes(5));
        assert!(segment_into_paths(&photos, &options).is_empty());

        let far = [photo("a", 10.0, 10.0, 0), photo("b", 11.0, 11.0, 1)];
        let options = SegmentOptions::default().with_max_segment_radius_km(500.0);
        assert_eq!(segment_into_paths(&far, &options).len(), 1);
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let mut no_time = photo("x", 44.5, -122.5, 1);
        no_time.timestamp = None;
        let mut no_lat = photo("y", 44.5, -122.5, 2);
        no_lat.latitude = None;

        let photos = [photo("a", 44.5, -122.5, 0), no_time, no_lat, photo("b", 44.5, -122.5, 3)];
        let paths = segment(&photos);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].photo_ids(), ["a", "b"]);
    }

    #[test]
    fn test_identical_timestamps_keep_input_order() {
        let photos = [
            photo("z", 44.5, -122.5, 0),
            photo("m", 44.5, -122.5, 0),
            photo("a", 44.5, -122.5, 0),
        ];
        let paths = segment(&photos);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].photo_ids(), ["z", "m", "a"]);
    }

    #[test]
    fn test_segment_stats() {
        let photos = [photo("a", 0.0, 0.0, 0), photo("b", 0.0, 0.003, 5)];
        let paths = segment(&photos);
        let stats = paths[0].stats();
        assert_eq!(stats.photo_count, 2);
        assert!((stats.total_distance_km - 0.3336).abs() < 0.001);
        assert_eq!(stats.duration, Duration::minutes(5));
    }

    fn arb_photos() -> impl Strategy<Value = Vec<PhotoRecord>> {
        prop::collection::vec(
            (44.4f64..44.6, -122.6f64..-122.4, 0i64..240, any::<bool>()),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (lat, lng, minutes, has_time))| {
                    let mut p = photo(&format!("p{i}"), lat, lng, minutes);
                    if !has_time {
                        p.timestamp = None;
                    }
                    p
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_deterministic(photos in arb_photos()) {
            prop_assert_eq!(segment(&photos), segment(&photos));
        }

        #[test]
        fn prop_segments_have_at_least_two_photos(photos in arb_photos()) {
            for path in segment(&photos) {
                prop_assert!(path.len() >= 2);
            }
        }

        #[test]
        fn prop_each_valid_photo_in_at_most_one_segment(photos in arb_photos()) {
            let valid = photos.iter().filter(|p| p.is_locatable()).count();
            let paths = segment(&photos);
            let mut seen = std::collections::HashSet::new();
            for path in &paths {
                for id in path.photo_ids() {
                    prop_assert!(seen.insert(id.to_string()));
                }
            }
            prop_assert!(seen.len() <= valid);
        }

        #[test]
        fn prop_segments_are_time_ordered_within_window(photos in arb_photos()) {
            let options = SegmentOptions::default();
            for path in segment(&photos) {
                let anchor = &path.points()[0];
                for pair in path.points().windows(2) {
                    prop_assert!(pair[0].timestamp <= pair[1].timestamp);
                }
                for p in path.points() {
                    prop_assert!(p.timestamp - anchor.timestamp <= options.max_time_gap);
                    prop_assert!(
                        haversine_distance(&anchor.position, &p.position)
                            <= options.max_segment_radius_km
                    );
                }
            }
        }
    }
}
