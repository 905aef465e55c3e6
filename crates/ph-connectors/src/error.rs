//! Error types for connector operations.

use thiserror::Error;

/// Errors that can occur while reading or writing tables.
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input parsed but did not form a valid table
    #[error("table error: {0}")]
    Table(#[from] ph_anonymize::AnonymizeError),

    /// No connector handles this file extension
    #[error("Unsupported file type {extension}. Only .csv is supported.")]
    UnsupportedFormat { extension: String },

    /// Input has no header row
    #[error("missing header row")]
    MissingHeader,
}

/// Result type alias for connector operations.
pub type Result<T> = std::result::Result<T, ConnectorError>;
