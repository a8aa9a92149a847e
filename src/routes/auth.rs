// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup and login routes.

use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::routes::parse_body;
use crate::services::accounts::{self, AuthResponse, LoginRequest, SignupRequest};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
}

/// Create an account and return a session token.
async fn signup(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let req = parse_body(payload)?;
    Ok(Json(accounts::signup(&state, req).await?))
}

/// Exchange credentials for a session token.
async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>> {
    let req = parse_body(payload)?;
    Ok(Json(accounts::login(&state, req).await?))
}
