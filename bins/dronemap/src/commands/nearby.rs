use anyhow::Result;
use dronemap_cli::output::{format_count, format_distance_km, Status};
use dronemap_core::config::Config;
use dronemap_core::{Error, ProximityNavigator};
use dronemap_geo::haversine_distance;
use std::path::Path;

pub fn run(
    config: &Config,
    photos_path: &Path,
    anchor_id: &str,
    radius_m: Option<f64>,
    json: bool,
) -> Result<()> {
    let photos = super::load_photos(photos_path)?;
    let radius = radius_m.unwrap_or(config.schema.nearby.radius_meters);
    anyhow::ensure!(radius >= 0.0, "--radius-m must not be negative");

    let anchor = photos
        .iter()
        .find(|p| p.id == anchor_id)
        .ok_or_else(|| Error::invalid_input(format!("No photo with id {anchor_id:?}")))?;
    let nav = ProximityNavigator::new(anchor, &photos, radius);

    if json {
        println!("{}", serde_json::to_string_pretty(nav.nearby())?);
        return Ok(());
    }

    Status::header(&format!(
        "{} within {} of {}",
        format_count(nav.nearby().len(), "photo", "photos"),
        format_distance_km(radius / 1000.0),
        anchor.id
    ));
    let Some(center) = anchor.position() else {
        Status::warning("Anchor photo has no GPS position");
        return Ok(());
    };
    for photo in nav.nearby() {
        let distance = photo
            .position()
            .map(|p| format_distance_km(haversine_distance(&center, &p)))
            .unwrap_or_default();
        Status::field(&photo.id, &distance);
    }
    Ok(())
}
