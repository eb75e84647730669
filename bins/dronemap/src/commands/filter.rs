use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use dronemap_cli::output::{format_count, Status};
use dronemap_core::{filter_photos, FilterSpec};
use dronemap_geo::{BoundingBox, Coordinate};
use std::path::Path;

/// Filter constraints; each one is optional and all given ones must hold
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Case-insensitive text searched in id, coordinates, altitude, camera, date and place
    #[arg(long)]
    pub text: Option<String>,

    /// Minimum altitude in meters (photos with unknown altitude are excluded)
    #[arg(long)]
    pub alt_min: Option<f64>,

    /// Maximum altitude in meters (photos with unknown altitude are excluded)
    #[arg(long)]
    pub alt_max: Option<f64>,

    /// Bounding box as north,south,east,west
    #[arg(long, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Radius center as lat,lng (requires --radius-km)
    #[arg(long, allow_hyphen_values = true, requires = "radius_km")]
    pub near: Option<Coordinate>,

    /// Radius around --near in kilometers
    #[arg(long, requires = "near")]
    pub radius_km: Option<f64>,

    /// Earliest capture time (RFC 3339, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest capture time (RFC 3339, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Read the whole filter from a JSON file instead
    #[arg(long, conflicts_with_all = ["text", "alt_min", "alt_max", "bbox", "near", "from", "to"])]
    pub spec: Option<std::path::PathBuf>,
}

fn parse_time(flag: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(v)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("{flag} expects an RFC 3339 time, got {v:?}"))
        })
        .transpose()
}

impl FilterArgs {
    pub fn to_spec(&self) -> Result<FilterSpec> {
        if let Some(path) = &self.spec {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return serde_json::from_str(&json)
                .with_context(|| format!("Invalid filter spec in {}", path.display()));
        }

        let mut spec = FilterSpec::new()
            .with_altitude_range(self.alt_min, self.alt_max)
            .with_date_range(
                parse_time("--from", self.from.as_deref())?,
                parse_time("--to", self.to.as_deref())?,
            );
        if let Some(text) = &self.text {
            spec = spec.with_text(text.clone());
        }
        if let Some(bbox) = self.bbox {
            if bbox.crosses_antimeridian() {
                Status::warning("Bounding box crosses the antimeridian and will match nothing");
            }
            spec = spec.with_bounding_box(bbox);
        }
        if let (Some(center), Some(radius_km)) = (self.near, self.radius_km) {
            anyhow::ensure!(radius_km >= 0.0, "--radius-km must not be negative");
            spec = spec.with_radius(center, radius_km);
        }
        Ok(spec)
    }
}

pub fn run(photos_path: &Path, args: &FilterArgs, json: bool) -> Result<()> {
    let photos = super::load_photos(photos_path)?;
    let spec = args.to_spec()?;
    let matched = filter_photos(&photos, &spec);

    if json {
        println!("{}", serde_json::to_string_pretty(&matched)?);
        return Ok(());
    }

    Status::header(&format!(
        "{} of {} match",
        format_count(matched.len(), "photo", "photos"),
        photos.len()
    ));
    for photo in &matched {
        let place = photo.location_name.as_deref().unwrap_or("");
        let when = photo
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        Status::field(&photo.id, &format!("{when}  {place}"));
    }
    Ok(())
}
