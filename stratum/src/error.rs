//! Error types used by the crate.

use stratum_types::error::StratumTypesError;
use thiserror::Error;

/// Stratum error type.
#[derive(Debug, Error)]
pub enum StratumError {
    /// Input data cannot be processed: missing values, wrong geometry kind, empty point sets, degenerate clusters.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A value is outside of its allowed range (e.g. dip above 90 degrees).
    #[error("value out of range: {0}")]
    OutOfRange(String),
    /// Invalid geometry.
    #[error(transparent)]
    Types(#[from] StratumTypesError),
    /// Error reading delimited text.
    #[error("failed to read csv data")]
    Csv(#[from] csv::Error),
    /// Error parsing options.
    #[error("failed to parse options")]
    Options(#[from] serde_json::Error),
    /// Error reading/writing data to the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}

impl StratumError {
    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Result type of the crate.
pub type Result<T> = std::result::Result<T, StratumError>;
