//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::docs::{ApiDoc, OPENAPI_PATH, SWAGGER_UI_PATH};
use super::handlers::{
    add_user, delete_user, get_user, list_users, ping, prometheus_metrics, update_user, AppState,
};
use crate::metrics::track_http;

fn user_routes() -> Router<AppState> {
    Router::new()
        // Health endpoint
        .route("/ping", get(ping))
        // User endpoints
        .route("/users", get(list_users))
        .route("/users/add", post(add_user))
        .route("/users/update", put(update_user))
        .route("/users/:id", get(get_user).delete(delete_user))
        // Metrics endpoint
        .route("/metrics", get(prometheus_metrics))
        .route_layer(middleware::from_fn(track_http))
}

fn finish(router: Router<AppState>, state: AppState) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the full router: user endpoints plus Swagger UI and OpenAPI JSON.
pub fn create_router(state: AppState) -> Router {
    let docs = SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi());
    finish(user_routes().merge(docs), state)
}

/// Create a router without the documentation endpoints.
pub fn api_router(state: AppState) -> Router {
    finish(user_routes(), state)
}
