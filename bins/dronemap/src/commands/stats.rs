use anyhow::Result;
use dronemap_cli::output::{format_count, format_distance_km, format_duration_secs, format_size, Status};
use dronemap_core::config::Config;
use dronemap_core::{flight_stats, segment_into_paths};
use std::path::Path;

pub fn run(config: &Config, photos_path: &Path, json: bool) -> Result<()> {
    let photos = super::load_photos(photos_path)?;
    let options = config.schema.segmentation.to_options()?;
    let stats = flight_stats(&photos);
    let flights = segment_into_paths(&photos, &options).len();
    let total_bytes: u64 = photos.iter().filter_map(|p| p.size_bytes).sum();

    if json {
        let out = serde_json::json!({
            "stats": stats,
            "flights": flights,
            "totalBytes": total_bytes,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    Status::header("Collection summary");
    Status::field("photos", &format_count(stats.photo_count, "photo", "photos"));
    Status::field("flights", &flights.to_string());
    Status::field("distance", &format_distance_km(stats.total_distance_km));
    Status::field("duration", &format_duration_secs(stats.duration.num_seconds()));
    if let (Some(start), Some(end)) = (stats.start, stats.end) {
        Status::field("from", &start.to_rfc3339());
        Status::field("to", &end.to_rfc3339());
    }
    Status::field("size", &format_size(total_bytes));
    Ok(())
}
