//! User record type and input parsing.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::RegistryError;

/// A single user record.
///
/// Missing fields deserialize to their zero values so that an absent `id`
/// or `name` is reported by validation, not by the JSON parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct User {
    /// User id. Required, must be non-zero.
    #[serde(default)]
    #[validate(custom(function = "require_non_zero"))]
    #[schema(example = 1)]
    pub id: i64,

    /// Display name. Required, must be non-empty.
    #[serde(default)]
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Alice")]
    pub name: String,
}

impl User {
    /// Create a new user record.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Check the required-field rules.
    pub fn check(&self) -> Result<(), RegistryError> {
        self.validate().map_err(RegistryError::from)
    }
}

fn require_non_zero(id: i64) -> Result<(), ValidationError> {
    if id == 0 {
        let mut err = ValidationError::new("required");
        err.message = Some("id is required".into());
        return Err(err);
    }
    Ok(())
}

/// Records every fresh registry starts with.
pub fn seed_users() -> Vec<User> {
    vec![User::new(1, "Alice"), User::new(2, "Bob")]
}

/// Parse the external string form of a user id.
pub fn parse_user_id(raw: &str) -> Result<i64, RegistryError> {
    raw.parse::<i64>()
        .map_err(|_| RegistryError::InvalidArgument(raw.to_string()))
}

/// Parse a raw JSON body into a user record.
///
/// Content type is not checked. Validation is left to the registry.
pub fn parse_user(body: &[u8]) -> Result<User, RegistryError> {
    serde_json::from_slice(body).map_err(|e| RegistryError::MalformedInput(e.to_string()))
}
