//! HTTP API module for the user endpoints, documentation and metrics.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use error::{ApiError, FailResponse};
pub use handlers::{AppState, MessageResponse};
pub use routes::{api_router, create_router};
