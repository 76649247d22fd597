//! Unified error types for the user registry service.

use thiserror::Error;
use validator::ValidationErrors;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but holds an unusable value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Request body could not be parsed into a user record.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A required field is missing or empty.
    #[error("{0}")]
    Validation(String),

    /// Id path parameter is not an integer.
    #[error("invalid user id {0:?}")]
    InvalidArgument(String),

    /// No record carries the requested id.
    #[error("user {0} not found")]
    NotFound(i64),
}

impl From<ValidationErrors> for RegistryError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(msg) => format!("{}: {}", field, msg),
                    None => format!("{}: failed '{}' check", field, err.code),
                })
            })
            .collect::<Vec<_>>()
            .join("; ");

        RegistryError::Validation(message)
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
