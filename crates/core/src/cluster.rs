//! Location markers: photos taken at (nearly) the same spot
//!
//! Photos are visited in input order. The first unclustered photo seeds a
//! cluster and pulls in every later unclustered photo within
//! `radius_meters` of the seed. Distances are always measured from the seed,
//! while the reported center is the running average of the members.

use dronemap_geo::{haversine_distance_meters, Coordinate};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::photo::PhotoRecord;

/// Default marker radius
pub const DEFAULT_CLUSTER_RADIUS_METERS: f64 = 10.0;

/// One location marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoCluster {
    /// Mean position of the members
    pub center: Coordinate,
    /// Member ids, seed first, then in input order
    pub photo_ids: Vec<String>,
}

impl PhotoCluster {
    /// Number of photos in the marker
    pub fn count(&self) -> usize {
        self.photo_ids.len()
    }

    /// True if the marker stands for more than one photo
    pub fn is_clustered(&self) -> bool {
        self.count() > 1
    }

    fn absorb(&mut self, id: &str, at: Coordinate) {
        self.photo_ids.push(id.to_string());
        let n = self.count() as f64;
        self.center = Coordinate::new(
            (self.center.latitude * (n - 1.0) + at.latitude) / n,
            (self.center.longitude * (n - 1.0) + at.longitude) / n,
        );
    }
}

/// Group photos into location markers.
///
/// Records without a position or timestamp are skipped. A photo id already
/// placed in a marker is not placed again.
///
/// # Panics
///
/// Panics if `radius_meters` is negative or NaN.
pub fn cluster_photos(photos: &[PhotoRecord], radius_meters: f64) -> Vec<PhotoCluster> {
    assert!(
        radius_meters >= 0.0,
        "radius_meters must be a non-negative number, got {radius_meters}"
    );
    let located: Vec<(&str, Coordinate)> = photos
        .iter()
        .filter_map(|photo| photo.fix().map(|(position, _)| (photo.id.as_str(), position)))
        .collect();

    let mut placed: HashSet<&str> = HashSet::with_capacity(located.len());
    let mut clusters = Vec::new();

    for (i, &(seed_id, seed)) in located.iter().enumerate() {
        if !placed.insert(seed_id) {
            continue;
        }
        let mut cluster = PhotoCluster {
            center: seed,
            photo_ids: vec![seed_id.to_string()],
        };
        for &(id, at) in &located[i + 1..] {
            if placed.contains(id) || haversine_distance_meters(&seed, &at) > radius_meters {
                continue;
            }
            placed.insert(id);
            cluster.absorb(id, at);
        }
        clusters.push(cluster);
    }

    debug!(
        photos = photos.len(),
        located = located.len(),
        markers = clusters.len(),
        "clustered photo locations"
    );

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn photo(id: &str, lat: f64, lng: f64) -> PhotoRecord {
        PhotoRecord::new(id, lat, lng, Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
    }

    fn ids(cluster: &PhotoCluster) -> Vec<&str> {
        cluster.photo_ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(cluster_photos(&[], DEFAULT_CLUSTER_RADIUS_METERS).is_empty());
    }

    #[test]
    fn test_nearby_photos_share_a_marker() {
        // 0.00005 degrees of latitude is ~5.6 m
        let photos = [
            photo("a", 44.5, -122.5),
            photo("far", 44.6, -122.5),
            photo("b", 44.50005, -122.5),
        ];
        let clusters = cluster_photos(&photos, DEFAULT_CLUSTER_RADIUS_METERS);

        assert_eq!(clusters.len(), 2);
        assert_eq!(ids(&clusters[0]), ["a", "b"]);
        assert!(clusters[0].is_clustered());
        assert!((clusters[0].center.latitude - 44.500025).abs() < 1e-9);
        assert_eq!(ids(&clusters[1]), ["far"]);
        assert_eq!(clusters[1].count(), 1);
        assert!(!clusters[1].is_clustered());
        assert_eq!(clusters[1].center, Coordinate::new(44.6, -122.5));
    }

    #[test]
    fn test_distance_is_measured_from_the_seed() {
        // b is ~8.9 m from a, c is ~8.9 m from b but ~17.8 m from a
        let photos = [
            photo("a", 44.5, -122.5),
            photo("b", 44.50008, -122.5),
            photo("c", 44.50016, -122.5),
        ];
        let clusters = cluster_photos(&photos, DEFAULT_CLUSTER_RADIUS_METERS);
        assert_eq!(clusters.len(), 2);
        assert_eq!(ids(&clusters[0]), ["a", "b"]);
        assert_eq!(ids(&clusters[1]), ["c"]);
    }

    #[test]
    fn test_radius_is_inclusive_and_zero_means_identical() {
        let photos = [photo("a", 1.0, 1.0), photo("b", 1.0, 1.0), photo("c", 1.0, 1.00001)];
        let clusters = cluster_photos(&photos, 0.0);
        assert_eq!(clusters.len(), 2);
        assert_eq!(ids(&clusters[0]), ["a", "b"]);
    }

    #[test]
    fn test_center_is_running_average() {
        let photos = [photo("a", 0.0, 0.0), photo("b", 0.00003, 0.0), photo("c", 0.00006, 0.0)];
        let clusters = cluster_photos(&photos, DEFAULT_CLUSTER_RADIUS_METERS);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].count(), 3);
        assert!((clusters[0].center.latitude - 0.00003).abs() < 1e-12);
    }

    #[test]
    fn test_unlocatable_and_repeated_ids_are_skipped() {
        let mut no_gps = photo("x", 0.0, 0.0);
        no_gps.longitude = None;
        let photos = [photo("a", 0.0, 0.0), no_gps, photo("a", 5.0, 5.0)];
        let clusters = cluster_photos(&photos, DEFAULT_CLUSTER_RADIUS_METERS);
        assert_eq!(clusters.len(), 1);
        assert_eq!(ids(&clusters[0]), ["a"]);
    }

    #[test]
    #[should_panic(expected = "non-negative")]
    fn test_negative_radius_panics() {
        cluster_photos(&[photo("a", 0.0, 0.0)], -1.0);
    }

    #[test]
    fn test_serializes_center_and_ids() {
        let clusters = cluster_photos(&[photo("a", 1.5, 2.5)], DEFAULT_CLUSTER_RADIUS_METERS);
        let json = serde_json::to_value(&clusters[0]).unwrap();
        assert_eq!(json["center"]["latitude"], 1.5);
        assert_eq!(json["photoIds"], serde_json::json!(["a"]));
    }
}
