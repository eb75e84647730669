//! Configuration schema definitions
//!
//! Every section and field is optional in the TOML file; missing values fall
//! back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::segment::{SegmentOptions, DEFAULT_MAX_SEGMENT_RADIUS_KM, DEFAULT_MAX_TIME_GAP_MINUTES};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// `[segmentation]`
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// `[nearby]`
    #[serde(default)]
    pub nearby: NearbyConfig,

    /// `[logging]`
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Flight path thresholds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentationConfig {
    /// Minutes after a segment's first photo before a new segment starts
    #[serde(default = "default_max_time_gap_minutes")]
    pub max_time_gap_minutes: i64,

    /// Kilometers from a segment's first photo before a new segment starts
    #[serde(default = "default_max_segment_radius_km")]
    pub max_segment_radius_km: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_time_gap_minutes: default_max_time_gap_minutes(),
            max_segment_radius_km: default_max_segment_radius_km(),
        }
    }
}

impl SegmentationConfig {
    /// Thresholds for [`crate::segment_into_paths`].
    ///
    /// Fails if the time window is too large to represent.
    pub fn to_options(&self) -> Result<SegmentOptions> {
        let max_time_gap = chrono::Duration::try_minutes(self.max_time_gap_minutes).ok_or_else(|| {
            Error::config_invalid(format!(
                "segmentation.max_time_gap_minutes is too large, got {}",
                self.max_time_gap_minutes
            ))
        })?;
        Ok(SegmentOptions {
            max_time_gap,
            max_segment_radius_km: self.max_segment_radius_km,
        })
    }
}

fn default_max_time_gap_minutes() -> i64 {
    DEFAULT_MAX_TIME_GAP_MINUTES
}

fn default_max_segment_radius_km() -> f64 {
    DEFAULT_MAX_SEGMENT_RADIUS_KM
}

/// Proximity browsing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyConfig {
    /// Default radius for `nearby` when `--radius-m` is not given
    #[serde(default = "default_radius_meters")]
    pub radius_meters: f64,

    /// Distance within which photos share one location marker
    #[serde(default = "default_cluster_radius_meters")]
    pub cluster_radius_meters: f64,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            radius_meters: default_radius_meters(),
            cluster_radius_meters: default_cluster_radius_meters(),
        }
    }
}

fn default_radius_meters() -> f64 {
    500.0
}

fn default_cluster_radius_meters() -> f64 {
    crate::cluster::DEFAULT_CLUSTER_RADIUS_METERS
}

/// Log output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
