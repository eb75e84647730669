//! Subcommand implementations

pub mod clusters;
pub mod filter;
pub mod nearby;
pub mod paths;
pub mod stats;

use dronemap_core::{parse_photos, PhotoRecord, ResultExt};
use std::path::Path;

/// Read and parse a photo batch, logging how many records were unusable
pub fn load_photos(path: &Path) -> dronemap_core::Result<Vec<PhotoRecord>> {
    let json = std::fs::read_to_string(path)
        .map_err(dronemap_core::Error::from)
        .context(format!("Failed to read {}", path.display()))?;
    let photos = parse_photos(&json)?;

    let unusable = photos.iter().filter(|p| !p.is_locatable()).count();
    tracing::debug!(path = %path.display(), photos = photos.len(), unusable, "loaded photos");
    if unusable > 0 {
        tracing::warn!(unusable, "skipping photos without GPS position or timestamp");
    }
    Ok(photos)
}
