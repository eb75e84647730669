//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, Result, ResultExt};
use std::path::{Path, PathBuf};

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed settings
    pub schema: ConfigSchema,
    /// File the settings came from; `None` when running on defaults
    pub path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from an explicit path, a standard location, or defaults.
    ///
    /// An explicit path that does not exist is an error; a missing file in the
    /// standard locations is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let schema = match &config_path {
            Some(p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        let config = Self {
            schema,
            path: config_path,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values the algorithms cannot work with
    pub fn validate(&self) -> Result<()> {
        let seg = &self.schema.segmentation;
        if seg.max_time_gap_minutes < 0 {
            return Err(Error::config_invalid(format!(
                "segmentation.max_time_gap_minutes must not be negative, got {}",
                seg.max_time_gap_minutes
            )));
        }
        if !(seg.max_segment_radius_km >= 0.0) {
            return Err(Error::config_invalid(format!(
                "segmentation.max_segment_radius_km must not be negative, got {}",
                seg.max_segment_radius_km
            )));
        }
        if !(self.schema.nearby.radius_meters >= 0.0) {
            return Err(Error::config_invalid(format!(
                "nearby.radius_meters must not be negative, got {}",
                self.schema.nearby.radius_meters
            )));
        }
        seg.to_options()?;
        if !(self.schema.nearby.cluster_radius_meters >= 0.0) {
            return Err(Error::config_invalid(format!(
                "nearby.cluster_radius_meters must not be negative, got {}",
                self.schema.nearby.cluster_radius_meters
            )));
        }
        Ok(())
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [".dronemap.toml", "dronemap.toml", ".config/dronemap.toml"];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &Path) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path)
        .map_err(Error::from)
        .context(format!("Failed to read config file {}", path.display()))?;

    toml::from_str(&content)
        .map_err(Error::from)
        .context(format!("Failed to parse config file {}", path.display()))
}
