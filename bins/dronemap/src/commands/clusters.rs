use anyhow::Result;
use dronemap_cli::output::{format_count, Status};
use dronemap_core::cluster_photos;
use dronemap_core::config::Config;
use std::path::Path;

pub fn run(config: &Config, photos_path: &Path, radius_m: Option<f64>, json: bool) -> Result<()> {
    let photos = super::load_photos(photos_path)?;
    let radius = radius_m.unwrap_or(config.schema.nearby.cluster_radius_meters);
    anyhow::ensure!(radius >= 0.0, "--radius-m must not be negative");

    let clusters = cluster_photos(&photos, radius);

    if json {
        let out: Vec<_> = clusters
            .iter()
            .map(|cluster| {
                serde_json::json!({
                    "latitude": cluster.center.latitude,
                    "longitude": cluster.center.longitude,
                    "count": cluster.count(),
                    "isClustered": cluster.is_clustered(),
                    "photoIds": cluster.photo_ids,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    Status::header(&format!(
        "{} for {}",
        format_count(clusters.len(), "location", "locations"),
        format_count(photos.len(), "photo", "photos")
    ));
    for cluster in &clusters {
        Status::field(
            &cluster.center.to_string(),
            &format_count(cluster.count(), "photo", "photos"),
        );
    }
    Ok(())
}
