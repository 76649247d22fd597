//! Failure responses returned by the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RegistryError;

/// Body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FailResponse {
    /// Always "fail".
    #[schema(example = "fail")]
    pub status: String,
    /// What went wrong.
    #[schema(example = "not found")]
    pub message: String,
}

impl FailResponse {
    /// Create a failure body with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "fail".to_string(),
            message: message.into(),
        }
    }
}

/// Error returned from handlers, rendered as a [`FailResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with an explicit status and message.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// HTTP status of the response.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Message placed in the response body.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RegistryError> for ApiError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::MalformedInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, "invalid JSON data")
            }
            RegistryError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            RegistryError::InvalidArgument(_) => {
                Self::new(StatusCode::NOT_FOUND, "invalid user ID")
            }
            RegistryError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "not found"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(FailResponse::new(self.message))).into_response()
    }
}
