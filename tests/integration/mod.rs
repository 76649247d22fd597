//! Integration tests for the user registry service.
//!
//! These drive the public router the same way the binary builds it.
//! Run with: cargo test --test integration

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use user_registry::api::{create_router, AppState, FailResponse, MessageResponse};
use user_registry::registry::{User, UserRegistry};

async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn users(app: &Router) -> Vec<User> {
    let (_, body) = call(app, Method::GET, "/users", None).await;
    serde_json::from_value(body).unwrap()
}

/// Full lifecycle: add, read back, update, delete.
#[tokio::test]
async fn test_user_lifecycle() {
    let app = create_router(AppState::default());

    let (status, _) = call(&app, Method::POST, "/users/add", Some(r#"{"id":3,"name":"Carol"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(&app, Method::GET, "/users/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<User>(body).unwrap(), User::new(3, "Carol"));

    let (status, body) = call(&app, Method::PUT, "/users/update", Some(r#"{"id":3,"name":"Caroline"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_value::<MessageResponse>(body).unwrap(),
        MessageResponse::new("user updated successfully")
    );

    let (status, _) = call(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        users(&app).await,
        vec![User::new(2, "Bob"), User::new(3, "Caroline")]
    );
}

/// Duplicate ids are accepted and always resolve to the first record.
#[tokio::test]
async fn test_duplicate_ids_resolve_to_first() {
    let app = create_router(AppState::default());

    let (status, _) = call(&app, Method::POST, "/users/add", Some(r#"{"id":2,"name":"Bobby"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/users/2", None).await;
    assert_eq!(serde_json::from_value::<User>(body).unwrap(), User::new(2, "Bob"));

    let (status, _) = call(&app, Method::DELETE, "/users/2", None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/users/2", None).await;
    assert_eq!(serde_json::from_value::<User>(body).unwrap(), User::new(2, "Bobby"));
}

/// Missing fields are validation failures, not parse failures.
#[tokio::test]
async fn test_missing_fields_fail_validation() {
    let app = create_router(AppState::default());

    let (status, body) = call(&app, Method::POST, "/users/add", Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_value::<FailResponse>(body).unwrap(),
        FailResponse::new("id: id is required; name: name is required")
    );

    let (status, body) = call(&app, Method::POST, "/users/add", Some(r#"{"id":5,"name":""}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_value::<FailResponse>(body).unwrap(),
        FailResponse::new("name: name is required")
    );

    assert_eq!(users(&app).await.len(), 2);
}

/// Concurrent adds through a shared state are all applied.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_are_serialized() {
    let state = AppState::new(UserRegistry::new());
    let app = create_router(state.clone());

    let mut handles = Vec::new();
    for id in 1..=50 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let body = format!(r#"{{"id":{},"name":"user-{}"}}"#, id, id);
            call(&app, Method::POST, "/users/add", Some(&body)).await.0
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    let registry = state.registry.read().await;
    assert_eq!(registry.len(), 50);
    for id in 1..=50 {
        assert!(registry.get(id).is_ok(), "missing user {}", id);
    }
}
