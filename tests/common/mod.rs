// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use skillswap_api::config::Config;
use skillswap_api::db::MemoryDb;
use skillswap_api::routes::create_router;
use skillswap_api::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Password used by every account the helpers register.
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Create a test app with an empty store.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

/// Create a test app with a custom frontend URL (cookie attributes follow it).
#[allow(dead_code)]
pub fn create_test_app_with_frontend_url(frontend_url: &str) -> (Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.frontend_url = frontend_url.to_string();
    create_test_app_with_config(config)
}

fn create_test_app_with_config(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        db: MemoryDb::new(),
    });
    (create_router(state.clone()), state)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a JSON request, optionally carrying a bearer token.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a body-less request, optionally carrying a bearer token.
#[allow(dead_code)]
pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Register an account, sign in, and return `(user id, bearer token)`.
#[allow(dead_code)]
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> (u64, String) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users/register",
            None,
            json!({
                "name": name,
                "email": email,
                "password": TEST_PASSWORD,
                "confirm_password": TEST_PASSWORD,
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": email, "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    (
        body["user"]["id"].as_u64().unwrap(),
        body["token"].as_str().unwrap().to_string(),
    )
}

/// Offer a skill as the given user and return its id.
#[allow(dead_code)]
pub async fn offer_skill(app: &Router, token: &str, name: &str, category: &str) -> u64 {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/skills",
            Some(token),
            json!({
                "name": name,
                "category": category,
                "wants_in_exchange": "Python Scripting",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_u64().unwrap()
}
