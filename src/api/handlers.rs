//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::warn;
use utoipa::ToSchema;

use super::error::{ApiError, FailResponse};
use crate::error::RegistryError;
use crate::metrics;
use crate::registry::{parse_user, parse_user_id, UpdateOutcome, User, UserRegistry};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// The user registry. Reads share the lock, mutations take it exclusively.
    pub registry: Arc<RwLock<UserRegistry>>,
    /// Prometheus handle, present when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state around an owned registry.
    pub fn new(registry: UserRegistry) -> Self {
        Self {
            registry: Arc::new(RwLock::new(registry)),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle so `/metrics` renders it.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(UserRegistry::seeded())
    }
}

/// Success body carrying a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    #[schema(example = "user added successfully")]
    pub message: String,
}

impl MessageResponse {
    /// Create a message body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Log and count rejected input before it becomes a response.
fn rejected(err: RegistryError) -> ApiError {
    if matches!(err, RegistryError::Validation(_)) {
        metrics::inc_validation_failures();
    }
    warn!("Rejected user input: {}", err);
    ApiError::from(err)
}

/// Health check handler - always returns pong.
#[utoipa::path(
    get,
    path = "/ping",
    tag = "system",
    responses((status = 200, description = "Service is up", body = MessageResponse))
)]
pub async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong"))
}

/// List all users in insertion order.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    let registry = state.registry.read().await;
    Json(registry.list().to_vec())
}

/// Get the first user with the given id.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "Invalid id or no such user", body = FailResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(&raw_id)?;
    let registry = state.registry.read().await;
    let user = registry.get(id)?;
    Ok(Json(user.clone()))
}

/// Append a user. Duplicate ids are accepted.
#[utoipa::path(
    post,
    path = "/users/add",
    tag = "users",
    request_body = User,
    responses(
        (status = 200, description = "User added", body = MessageResponse),
        (status = 400, description = "Malformed body or missing field", body = FailResponse)
    )
)]
pub async fn add_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<MessageResponse>, ApiError> {
    let user = parse_user(&body).map_err(rejected)?;

    let mut registry = state.registry.write().await;
    registry.add(user).map_err(rejected)?;

    metrics::inc_users_added();
    metrics::set_users_registered(registry.len());
    Ok(Json(MessageResponse::new("user added successfully")))
}

/// Replace the first user with the same id.
///
/// A missing id is not an error: the response is 200 with a fail body.
#[utoipa::path(
    put,
    path = "/users/update",
    tag = "users",
    request_body = User,
    responses(
        (status = 200, description = "User replaced, or a fail body when no user matched", body = MessageResponse),
        (status = 400, description = "Malformed body or missing field", body = FailResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let user = parse_user(&body).map_err(rejected)?;

    let mut registry = state.registry.write().await;
    let response = match registry.update(user).map_err(rejected)? {
        UpdateOutcome::Replaced => {
            metrics::inc_users_updated();
            Json(MessageResponse::new("user updated successfully")).into_response()
        }
        UpdateOutcome::NotFound => Json(FailResponse::new("user not found")).into_response(),
    };
    Ok(response)
}

/// Remove the first user with the given id.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = MessageResponse),
        (status = 404, description = "Invalid id or no such user", body = FailResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_user_id(&raw_id)?;

    let mut registry = state.registry.write().await;
    registry.remove(id).map_err(|err| match err {
        RegistryError::NotFound(_) => ApiError::new(StatusCode::NOT_FOUND, "user not found"),
        other => ApiError::from(other),
    })?;

    metrics::inc_users_removed();
    metrics::set_users_registered(registry.len());
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Prometheus exposition - 404 when no recorder is installed.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn default_state_holds_seed() {
        let state = AppState::default();
        let registry = state.registry.read().await;
        assert_eq!(registry.list(), &[User::new(1, "Alice"), User::new(2, "Bob")]);
        assert!(state.metrics.is_none());
    }

    #[tokio::test]
    async fn get_user_rejects_non_integer_id() {
        let state = AppState::default();
        let err = get_user(State(state), Path("abc".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::new(StatusCode::NOT_FOUND, "invalid user ID"));
    }

    #[tokio::test]
    async fn delete_user_reports_missing_user() {
        let state = AppState::default();
        let err = delete_user(State(state.clone()), Path("999".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::new(StatusCode::NOT_FOUND, "user not found"));
        assert_eq!(state.registry.read().await.len(), 2);
    }

    #[tokio::test]
    async fn add_user_stops_at_malformed_body() {
        let state = AppState::default();
        let err = add_user(State(state.clone()), Bytes::from_static(b"{"))
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::new(StatusCode::BAD_REQUEST, "invalid JSON data"));
        assert_eq!(state.registry.read().await.len(), 2);
    }

    #[tokio::test]
    async fn shared_state_sees_mutations() {
        let state = AppState::default();
        add_user(
            State(state.clone()),
            Bytes::from_static(br#"{"id":3,"name":"Carol"}"#),
        )
        .await
        .unwrap();

        let Json(users) = list_users(State(state)).await;
        assert_eq!(users.last(), Some(&User::new(3, "Carol")));
    }
}
