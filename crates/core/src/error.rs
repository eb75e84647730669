//! Structured errors with codes, context and recovery suggestions
//!
//! The segmentation, filtering and navigation algorithms never fail; these
//! errors surface only from configuration loading, input parsing and the
//! reverse-geocoding throttle.

use dronemap_geo::GeoError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    /// Failure without a more specific code
    Unknown = 1000,

    // IO errors (2xxx)
    /// Any other I/O failure
    IoError = 2000,
    /// A named file does not exist
    FileNotFound = 2001,
    /// A named file cannot be read
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    /// `--config` names a missing file
    ConfigNotFound = 3001,
    /// The configuration file is not valid TOML for the schema
    ConfigParseError = 3002,
    /// A configuration value is out of range
    ConfigValidationError = 3003,

    // Input errors (6xxx)
    /// A command argument does not fit the data
    InvalidInput = 6001,
    /// Photo records are not valid JSON
    InvalidFormat = 6002,
    /// A coordinate or bounding box string cannot be parsed
    InvalidCoordinate = 6003,

    // Geocoding errors (9xxx)
    /// A reverse-geocoding backend failed
    GeocodingError = 9000,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "IO",
            3 => "Configuration",
            6 => "Input",
            9 => "Geocoding",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    /// Explicit configuration path that does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
        .with_suggestion("Create a dronemap.toml file or omit --config to use defaults")
    }

    /// Configuration value out of range
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigValidationError, message)
    }

    /// Argument that does not fit the loaded data
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Reverse-geocoding backend failure
    pub fn geocoding(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GeocodingError, message)
    }
}

/// Serializable error report for logging and machine-readable CLI output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Symbolic code
    pub code: ErrorCode,
    /// Code rendered as `E####`
    pub code_str: String,
    /// Category name
    pub category: String,
    /// Human-readable message
    pub message: String,
    /// Additional context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Recovery suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Source error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    /// Any failure not listed below
    pub const FAILURE: i32 = 1;
    /// Bad photo data or arguments
    pub const INPUT_ERROR: i32 = 2;
    /// Missing or invalid configuration
    pub const CONFIG_ERROR: i32 = 3;
}

impl Error {
    /// Map the error onto a process exit code
    pub fn exit_code(&self) -> i32 {
        match self.code.category() {
            "Configuration" => exit_codes::CONFIG_ERROR,
            "Input" => exit_codes::INPUT_ERROR,
            _ => exit_codes::FAILURE,
        }
    }
}

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::InvalidFormat, format!("JSON parse error: {}", err))
            .with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        Error::new(ErrorCode::InvalidCoordinate, err.to_string())
            .with_context(format!("geo error {}", err.code() as u32))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FileNotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::GeocodingError.to_string(), "E9000");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoError.category(), "IO");
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidCoordinate.category(), "Input");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::config_not_found("/path/to/dronemap.toml")
            .with_context("While loading configuration");

        assert_eq!(err.code, ErrorCode::ConfigNotFound);
        assert!(err.context.is_some());
        assert!(err.suggestion.is_some());
        assert_eq!(err.exit_code(), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_from_geo_error() {
        let geo = "abc".parse::<dronemap_geo::Coordinate>().unwrap_err();
        let err: Error = geo.into();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
        assert_eq!(err.exit_code(), exit_codes::INPUT_ERROR);
        assert!(err.source.is_some());
    }

    #[test]
    fn test_io_error_codes() {
        let missing: Error = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert_eq!(missing.code, ErrorCode::FileNotFound);
        let denied: Error = std::io::Error::from(std::io::ErrorKind::PermissionDenied).into();
        assert_eq!(denied.code, ErrorCode::PermissionDenied);
        assert_eq!(denied.exit_code(), exit_codes::FAILURE);
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::geocoding("lookup failed").with_context("While annotating photos");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E9000"));
        assert!(json.contains("Geocoding"));
    }
}
