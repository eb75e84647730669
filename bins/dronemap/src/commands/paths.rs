use anyhow::Result;
use chrono::Duration;
use dronemap_cli::output::{format_count, format_distance_km, format_duration_secs, Status};
use dronemap_core::config::Config;
use dronemap_core::{segment_into_paths, Error};
use dronemap_telemetry::timed;
use std::path::Path;

pub fn run(
    config: &Config,
    photos_path: &Path,
    max_gap_minutes: Option<i64>,
    max_radius_km: Option<f64>,
    json: bool,
) -> Result<()> {
    let photos = super::load_photos(photos_path)?;

    let mut options = config.schema.segmentation.to_options()?;
    if let Some(minutes) = max_gap_minutes {
        anyhow::ensure!(minutes >= 0, "--max-gap-minutes must not be negative");
        let gap = Duration::try_minutes(minutes)
            .ok_or_else(|| Error::invalid_input(format!("--max-gap-minutes is too large, got {minutes}")))?;
        options = options.with_max_time_gap(gap);
    }
    if let Some(km) = max_radius_km {
        anyhow::ensure!(km >= 0.0, "--max-radius-km must not be negative");
        options = options.with_max_segment_radius_km(km);
    }

    let paths = timed("segment_into_paths", || segment_into_paths(&photos, &options));

    if json {
        let out: Vec<_> = paths
            .iter()
            .map(|path| {
                serde_json::json!({
                    "coordinates": path.coordinates(),
                    "photoIds": path.photo_ids(),
                    "stats": path.stats(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    Status::header(&format!("Found {}", format_count(paths.len(), "flight", "flights")));
    for (i, path) in paths.iter().enumerate() {
        let stats = path.stats();
        Status::info(&format!(
            "Flight {} · {} · {} · {}",
            i + 1,
            path.start().format("%Y-%m-%d %H:%M"),
            format_count(path.len(), "photo", "photos"),
            format_distance_km(stats.total_distance_km),
        ));
        Status::field("duration", &format_duration_secs(stats.duration.num_seconds()));
    }
    Ok(())
}
