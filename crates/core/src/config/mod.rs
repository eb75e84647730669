//! Configuration loading and schema definitions
//!
//! Thresholds and throttle settings read from `dronemap.toml`.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
