use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the CDN cost estimator.
#[derive(Error, Debug)]
pub enum CostError {
    /// A usage file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A usage file is not valid JSON.
    #[error("Failed to parse JSON in {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A usage file parsed, but its top-level value is not a JSON object.
    #[error("Expected a JSON object in {path}")]
    NotAnObject { path: PathBuf },

    /// A usage record lacks one of the required counters.
    #[error("Missing required field {field} in {path}")]
    MissingField { path: PathBuf, field: &'static str },

    /// A required counter is present but not a finite non-negative number.
    #[error("Invalid value for field {field} in {path}: {value}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        value: String,
    },

    /// Estimation was requested before any usage record was merged.
    #[error("No usage records were loaded")]
    NoInput,
}

impl CostError {
    /// `true` for the failures that mean the file itself could not be parsed,
    /// as opposed to a well-formed record with bad or missing counters.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            CostError::FileRead { .. } | CostError::JsonParse { .. } | CostError::NotAnObject { .. }
        )
    }
}

/// Convenience alias used throughout the cost crates.
pub type Result<T> = std::result::Result<T, CostError>;
