//! Distance and duration summaries for a set of photos

use chrono::{DateTime, Duration, Utc};
use dronemap_geo::{haversine_distance, Coordinate};
use serde::{Deserialize, Serialize};

use crate::photo::PhotoRecord;

/// Summary of a flight or of an arbitrary photo collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightStats {
    /// Number of locatable photos considered
    pub photo_count: usize,
    /// Sum of great-circle hops between consecutive photos, in capture order
    pub total_distance_km: f64,
    /// Earliest capture time
    pub start: Option<DateTime<Utc>>,
    /// Latest capture time
    pub end: Option<DateTime<Utc>>,
    /// `end - start`, serialized as whole seconds
    #[serde(with = "duration_seconds")]
    pub duration: Duration,
}

impl Default for FlightStats {
    fn default() -> Self {
        Self {
            photo_count: 0,
            total_distance_km: 0.0,
            start: None,
            end: None,
            duration: Duration::zero(),
        }
    }
}

impl FlightStats {
    pub(crate) fn from_fixes(fixes: impl IntoIterator<Item = (Coordinate, DateTime<Utc>)>) -> Self {
        let mut fixes: Vec<_> = fixes.into_iter().collect();
        if fixes.is_empty() {
            return Self::default();
        }
        // Stable, so equal timestamps keep their input order
        fixes.sort_by_key(|(_, t)| *t);

        let total_distance_km = fixes
            .windows(2)
            .map(|w| haversine_distance(&w[0].0, &w[1].0))
            .sum();
        let start = fixes[0].1;
        let end = fixes[fixes.len() - 1].1;

        Self {
            photo_count: fixes.len(),
            total_distance_km,
            start: Some(start),
            end: Some(end),
            duration: end - start,
        }
    }

    /// Total distance in meters
    pub fn total_distance_meters(&self) -> f64 {
        self.total_distance_km * 1000.0
    }
}

/// Summarise a photo collection; records without position or timestamp are skipped
pub fn flight_stats(photos: &[PhotoRecord]) -> FlightStats {
    FlightStats::from_fixes(photos.iter().filter_map(PhotoRecord::fix))
}

mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        i64::deserialize(d).map(Duration::seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn test_empty_collection() {
        let stats = flight_stats(&[]);
        assert_eq!(stats, FlightStats::default());
        assert_eq!(stats.total_distance_meters(), 0.0);
    }

    #[test]
    fn test_distance_follows_capture_order() {
        // Out-of-order input: sorted it's (0,0) -> (0,0.003) -> (0,0.006)
        let photos = [
            PhotoRecord::new("c", 0.0, 0.006, t(10)),
            PhotoRecord::new("a", 0.0, 0.0, t(0)),
            PhotoRecord::new("b", 0.0, 0.003, t(5)),
        ];
        let stats = flight_stats(&photos);
        assert_eq!(stats.photo_count, 3);
        assert!((stats.total_distance_km - 0.6672).abs() < 0.001);
        assert_eq!(stats.start, Some(t(0)));
        assert_eq!(stats.end, Some(t(10)));
        assert_eq!(stats.duration, Duration::minutes(10));
    }

    #[test]
    fn test_skips_unlocatable_records() {
        let mut no_gps = PhotoRecord::new("x", 0.0, 0.0, t(1));
        no_gps.latitude = None;
        let photos = [PhotoRecord::new("a", 0.0, 0.0, t(0)), no_gps];
        let stats = flight_stats(&photos);
        assert_eq!(stats.photo_count, 1);
        assert_eq!(stats.total_distance_km, 0.0);
        assert_eq!(stats.duration, Duration::zero());
    }

    #[test]
    fn test_serializes_duration_as_seconds() {
        let photos = [PhotoRecord::new("a", 0.0, 0.0, t(0)), PhotoRecord::new("b", 0.0, 0.0, t(2))];
        let json = serde_json::to_value(flight_stats(&photos)).unwrap();
        assert_eq!(json["duration"], 120);
    }
}
