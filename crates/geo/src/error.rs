//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Input did not have the expected number of comma-separated fields
    #[error("Expected {expected} comma-separated values, found {found}: {input:?}")]
    FieldCount {
        /// Number of fields required
        expected: usize,
        /// Number of fields present
        found: usize,
        /// Original input
        input: String,
    },

    /// A field could not be parsed as a number
    #[error("Invalid number {value:?}: {source}")]
    InvalidNumber {
        /// Offending field
        value: String,
        /// Underlying parse error
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

/// Error code for integration with dronemap-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Wrong field count
    FieldCount = 10001,
    /// Unparseable number
    InvalidNumber = 10002,
    /// Invalid coordinate values
    InvalidCoordinate = 10003,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::FieldCount { .. } => GeoErrorCode::FieldCount,
            GeoError::InvalidNumber { .. } => GeoErrorCode::InvalidNumber,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
        }
    }
}
