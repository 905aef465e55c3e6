//! Error types for the anonymization engine.

use thiserror::Error;

/// Result type for anonymization operations.
pub type Result<T> = std::result::Result<T, AnonymizeError>;

/// Errors that can occur while building rules or tables.
#[derive(Error, Debug)]
pub enum AnonymizeError {
    /// A rule names an action outside the supported set.
    #[error("unsupported action '{action}' for field '{field}' (expected one of: suppress, mask, pseudonymize)")]
    UnsupportedAction { field: String, action: String },

    /// A rule is structurally invalid (e.g. empty field name).
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A column's length does not match the table's row count.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Two columns share the same name.
    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    /// JSON parsing error for rule configuration.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AnonymizeError {
    /// Returns whether this error stems from rule configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            AnonymizeError::UnsupportedAction { .. }
                | AnonymizeError::InvalidRule(_)
                | AnonymizeError::JsonError(_)
        )
    }
}
