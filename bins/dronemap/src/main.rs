//! dronemap: group geotagged drone photos into flights, filter and browse them.
//!
//! Every subcommand reads a JSON array of photo records as produced by the
//! importer (`id`, `latitude`, `longitude`, `altitude`, `timestamp`, ...).

use clap::{Parser, Subcommand};
use dronemap_cli::output::Status;
use dronemap_core::config::Config;
use dronemap_core::{Error, ErrorCode};
use dronemap_telemetry::TelemetryConfig;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

/// Drone photo flight paths and filters
#[derive(Parser)]
#[command(name = "dronemap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./dronemap.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group photos into flight paths
    Paths {
        /// JSON file with photo records
        photos: PathBuf,

        /// Minutes after a flight's first photo before a new flight starts
        #[arg(long)]
        max_gap_minutes: Option<i64>,

        /// Kilometers from a flight's first photo before a new flight starts
        #[arg(long)]
        max_radius_km: Option<f64>,
    },

    /// Select photos by text, altitude, area and date
    Filter {
        /// JSON file with photo records
        photos: PathBuf,

        #[command(flatten)]
        args: commands::filter::FilterArgs,
    },

    /// List photos around one photo
    Nearby {
        /// JSON file with photo records
        photos: PathBuf,

        /// Id of the anchor photo
        #[arg(long)]
        anchor: String,

        /// Radius in meters (defaults to the configured value)
        #[arg(long)]
        radius_m: Option<f64>,
    },

    /// Summarise distance, duration and size of a photo set
    Stats {
        /// JSON file with photo records
        photos: PathBuf,
    },

    /// Group photos taken at the same spot into location markers
    Clusters {
        /// JSON file with photo records
        photos: PathBuf,

        /// Marker radius in meters (defaults to the configured value)
        #[arg(long)]
        radius_m: Option<f64>,
    },
}

/// Print an error on stderr, as a JSON report when `--json` is set
fn report_error(err: &Error, json: bool) -> ExitCode {
    match json.then(|| serde_json::to_string_pretty(&err.to_report())) {
        Some(Ok(report)) => eprintln!("{report}"),
        _ => Status::error(&err.to_string()),
    }
    ExitCode::from(err.exit_code() as u8)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => return report_error(&err, cli.json),
    };

    let level = if cli.verbose {
        "debug".to_string()
    } else {
        config.schema.logging.level.clone()
    };
    if let Err(err) = dronemap_telemetry::init_with_config(TelemetryConfig::with_level(level)) {
        Status::warning(&format!("Logging disabled: {err}"));
    }

    let result = match cli.command {
        Commands::Paths { photos, max_gap_minutes, max_radius_km } => {
            commands::paths::run(&config, &photos, max_gap_minutes, max_radius_km, cli.json)
        }
        Commands::Filter { photos, args } => commands::filter::run(&photos, &args, cli.json),
        Commands::Nearby { photos, anchor, radius_m } => {
            commands::nearby::run(&config, &photos, &anchor, radius_m, cli.json)
        }
        Commands::Stats { photos } => commands::stats::run(&config, &photos, cli.json),
        Commands::Clusters { photos, radius_m } => {
            commands::clusters::run(&config, &photos, radius_m, cli.json)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let err = err
                .downcast::<Error>()
                .unwrap_or_else(|other| Error::new(ErrorCode::Unknown, format!("{other:#}")));
            report_error(&err, cli.json)
        }
    }
}
