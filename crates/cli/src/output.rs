//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output. Status lines go to stdout,
//! warnings and errors to stderr.

use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }

    /// Print an indented `label: value` line
    pub fn field(label: &str, value: &str) {
        println!("  {} {}", format!("{label}:").dimmed(), value);
    }
}

/// Format a duration given in whole seconds
pub fn format_duration_secs(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let (hours, mins, rem) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{sign}{hours}h {mins}m")
    } else if mins > 0 {
        format!("{sign}{mins}m {rem}s")
    } else {
        format!("{sign}{rem}s")
    }
}

/// Format a distance given in kilometers, switching to meters below 1 km
pub fn format_distance_km(km: f64) -> String {
    if km.abs() < 1.0 {
        format!("{:.0} m", km * 1000.0)
    } else {
        format!("{:.2} km", km)
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
