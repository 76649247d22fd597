//! Generated OpenAPI document.

use utoipa::OpenApi;

use super::error::FailResponse;
use super::handlers::{self, MessageResponse};
use crate::error::Result;
use crate::registry::User;

/// Path of the OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";
/// Mount point of the Swagger UI.
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// OpenAPI description of the user endpoints.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Registry API",
        description = "CRUD endpoints over an in-memory list of users"
    ),
    paths(
        handlers::ping,
        handlers::list_users,
        handlers::get_user,
        handlers::add_user,
        handlers::update_user,
        handlers::delete_user,
    ),
    components(schemas(User, MessageResponse, FailResponse)),
    tags(
        (name = "users", description = "User management"),
        (name = "system", description = "Liveness")
    )
)]
pub struct ApiDoc;

/// Render the OpenAPI document as pretty JSON.
pub fn openapi_json() -> Result<String> {
    Ok(ApiDoc::openapi().to_pretty_json()?)
}
