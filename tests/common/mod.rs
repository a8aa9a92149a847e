// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use visionx_backend::config::Config;
use visionx_backend::db::SqliteDb;
use visionx_backend::routes::create_router;
use visionx_backend::AppState;

/// Create a test app on a fresh in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(Config::test_default()).await
}

/// Create a test app from a custom config (the database is always in-memory).
#[allow(dead_code)]
pub async fn create_test_app_with(config: Config) -> (Router, Arc<AppState>) {
    let db = SqliteDb::in_memory()
        .await
        .expect("Failed to open in-memory database");
    let state = Arc::new(AppState::new(&config, db).expect("Failed to build state"));

    (create_router(state.clone()), state)
}

/// Build a request with an optional bearer token and optional JSON body.
#[allow(dead_code)]
pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON response (Null for an empty body).
#[allow(dead_code)]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body should be JSON")
    };
    (status, json)
}

/// Sign up a user through the API and return the session token.
#[allow(dead_code)]
pub async fn signup(app: &Router, college_id: &str, password: &str, role: Option<&str>) -> String {
    let mut body = serde_json::json!({
        "collegeId": college_id,
        "password": password,
    });
    if let Some(role) = role {
        body["role"] = Value::from(role);
    }

    let (status, json) = send(app, request("POST", "/api/auth/signup", None, Some(body))).await;
    assert_eq!(status, StatusCode::OK, "signup failed: {}", json);

    json["token"]
        .as_str()
        .expect("signup should return a token")
        .to_string()
}
