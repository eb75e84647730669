//! Terminal output helpers for the dronemap command line
//!
//! - Status lines (success, warning, error, info)
//! - Human formatting of distances, durations, sizes and counts

#![warn(missing_docs)]

pub mod output;
