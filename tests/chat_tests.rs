// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat responder tests.
//!
//! The provider path runs against a local axum stub standing in for the
//! chat completion API.

use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::time::Duration;
use visionx_backend::config::Config;
use visionx_backend::services::chat::{
    ANXIETY_REPLY, BREATHING_REPLY, GENERIC_REPLY, PROVIDER_FAILURE_REPLY,
};

mod common;
use common::{request, send};

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn provider_config(base_url: String) -> Config {
    Config {
        openai_api_key: Some("test-key".to_string()),
        openai_api_url: base_url,
        openai_model: "test-model".to_string(),
        chat_timeout: Duration::from_millis(500),
        ..Config::test_default()
    }
}

async fn chat(app: &Router, token: &str, message: &str) -> (StatusCode, Value) {
    send(
        app,
        request(
            "POST",
            "/api/chat",
            Some(token),
            Some(json!({ "message": message })),
        ),
    )
    .await
}

#[tokio::test]
async fn test_fallback_replies_without_provider() {
    let (app, _) = common::create_test_app().await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    for (message, expected) in [
        ("I need a breathing exercise", BREATHING_REPLY),
        ("I feel anxious", ANXIETY_REPLY),
        ("hello", GENERIC_REPLY),
        ("So anxious I forgot how to BREATHE", BREATHING_REPLY),
    ] {
        let (status, body) = chat(&app, &token, message).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], expected, "message {:?}", message);
    }
}

#[tokio::test]
async fn test_provider_success() {
    let stub = Router::new().route(
        "/chat/completions",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            assert_eq!(headers["authorization"], "Bearer test-key");
            assert_eq!(body["model"], "test-model");
            assert_eq!(body["max_tokens"], 500);
            assert_eq!(body["messages"][0]["role"], "system");
            assert_eq!(body["messages"][1]["role"], "user");

            let echoed = body["messages"][1]["content"].as_str().unwrap_or_default();
            Json(json!({
                "choices": [
                    { "message": { "role": "assistant", "content": format!("echo: {}", echoed) } }
                ]
            }))
        }),
    );
    let base_url = spawn_provider(stub).await;

    let (app, state) = common::create_test_app_with(provider_config(base_url)).await;
    assert!(state.chat.has_provider());
    let token = common::signup(&app, "C-1", "pw", None).await;

    let (status, body) = chat(&app, &token, "I feel anxious").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "echo: I feel anxious");
}

#[tokio::test]
async fn test_provider_error_status_becomes_apology() {
    let stub = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
    );
    let base_url = spawn_provider(stub).await;

    let (app, _) = common::create_test_app_with(provider_config(base_url)).await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    let (status, body) = chat(&app, &token, "breathing please").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], PROVIDER_FAILURE_REPLY);
}

#[tokio::test]
async fn test_provider_malformed_body_becomes_apology() {
    let stub = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base_url = spawn_provider(stub).await;

    let (app, _) = common::create_test_app_with(provider_config(base_url)).await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    let (status, body) = chat(&app, &token, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], PROVIDER_FAILURE_REPLY);
}

#[tokio::test]
async fn test_provider_timeout_becomes_apology() {
    let stub = Router::new().route(
        "/chat/completions",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "choices": [ { "message": { "content": "too late" } } ] }))
        }),
    );
    let base_url = spawn_provider(stub).await;

    let (app, _) = common::create_test_app_with(provider_config(base_url)).await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    let started = std::time::Instant::now();
    let (status, body) = chat(&app, &token, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], PROVIDER_FAILURE_REPLY);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_unreachable_provider_becomes_apology() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let (app, _) = common::create_test_app_with(provider_config(base_url)).await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    let (status, body) = chat(&app, &token, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], PROVIDER_FAILURE_REPLY);
}

#[tokio::test]
async fn test_overlong_message_rejected() {
    let (app, _) = common::create_test_app().await;
    let token = common::signup(&app, "C-1", "pw", None).await;

    let (status, body) = chat(&app, &token, &"a".repeat(4001)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
