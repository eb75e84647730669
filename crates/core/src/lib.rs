//! Flight-path segmentation and photo filtering for dronemap
//!
//! This crate works on an in-memory batch of geotagged drone photos:
//!
//! - **Segmentation**: group photos into flights by time and distance from each flight's first photo
//! - **Filtering**: text, altitude, bounding-box, radius and date constraints combined with AND
//! - **Proximity**: list and step through the photos around an anchor photo
//! - **Statistics**: distance and duration of a flight or collection
//! - **Location markers**: photos taken within a few meters of each other
//! - **Geocoding contract**: throttled reverse lookups for importers
//! - **Configuration**: TOML thresholds with defaults
//!
//! All algorithms are pure, synchronous functions of their inputs.
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use dronemap_core::{filter_photos, find_nearby, segment_into_paths, FilterSpec, PhotoRecord, SegmentOptions};
//!
//! let t = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
//! let photos = vec![
//!     PhotoRecord::new("a", 0.0, 0.0, t).with_altitude(80.0),
//!     PhotoRecord::new("b", 0.0, 0.003, t + chrono::Duration::minutes(5)),
//!     PhotoRecord::new("c", 10.0, 10.0, t + chrono::Duration::minutes(6)),
//! ];
//!
//! assert_eq!(segment_into_paths(&photos, &SegmentOptions::default()).len(), 1);
//! assert_eq!(filter_photos(&photos, &FilterSpec::new().with_altitude_range(Some(50.0), None)).len(), 1);
//! assert_eq!(find_nearby(&photos[0], &photos, 500.0).len(), 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cluster;
pub mod config;
pub mod error;
pub mod filter;
pub mod geocode;
pub mod navigator;
pub mod photo;
pub mod segment;
pub mod stats;

pub use cluster::{cluster_photos, PhotoCluster};
pub use error::{Error, ErrorCode, Result, ResultExt};
pub use filter::{filter_photos, FilterSpec, RadiusQuery};
pub use navigator::{find_nearby, ProximityNavigator};
pub use photo::{parse_photos, PhotoRecord};
pub use segment::{segment_into_paths, PathPoint, PathSegment, SegmentOptions};
pub use stats::{flight_stats, FlightStats};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cluster::{cluster_photos, PhotoCluster};
    pub use crate::config::Config;
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::filter::{filter_photos, FilterSpec};
    pub use crate::geocode::{GeocodeThrottle, ReverseGeocoder, ThrottledGeocoder};
    pub use crate::navigator::{find_nearby, ProximityNavigator};
    pub use crate::photo::PhotoRecord;
    pub use crate::segment::{segment_into_paths, PathSegment, SegmentOptions};
    pub use crate::stats::{flight_stats, FlightStats};
}
