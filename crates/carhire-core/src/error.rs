//! Error types for domain rule violations

use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when a model rejects a change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// No extra with this id is offered on the pending booking
    #[error("Extra not found: {0}")]
    ExtraNotFound(u32),

    /// Flight numbers start with two letters followed by three digits
    #[error("Invalid flight number: {0}")]
    InvalidFlightNumber(String),

    /// A value could not be interpreted
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ModelError {
    /// Create an invalid value error
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}
