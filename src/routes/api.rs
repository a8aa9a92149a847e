// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::ScreeningResult;
use crate::routes::parse_body;
use crate::services::reports::{self, ReportsResponse};
use crate::services::screening::{self, Answer};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via bearer token).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/test/submit", post(submit_test))
        .route("/api/management/reports", get(management_reports))
        .route("/api/chat", post(chat))
}

// ─── Screening ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct TestSubmitRequest {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Answers must be a non-empty list of at most 200 entries"
    ))]
    pub answers: Vec<Answer>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TestSubmitResponse {
    pub ok: bool,
    pub test: ScreeningResult,
}

/// Score and store a questionnaire submission.
async fn submit_test(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: std::result::Result<Json<TestSubmitRequest>, JsonRejection>,
) -> Result<Json<TestSubmitResponse>> {
    let req = parse_body(payload)?;
    let test = screening::submit(&state.db, &user, &req.answers).await?;

    Ok(Json(TestSubmitResponse { ok: true, test }))
}

// ─── Reports ─────────────────────────────────────────────────

/// Recent results across all users (management only).
async fn management_reports(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<ReportsResponse>> {
    Ok(Json(reports::recent_reports(&state.db, &user).await?))
}

// ─── Chat ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(max = 4000, message = "message is too long"))]
    pub message: String,
}

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChatResponse {
    pub response: String,
}

/// Reply to a chat message. Provider failures still return 200.
async fn chat(
    State(state): State<Arc<AppState>>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>> {
    let req = parse_body(payload)?;
    tracing::debug!(
        college_id = %user.college_id,
        provider = state.chat.has_provider(),
        "Chat message received"
    );

    let response = state.chat.respond(&req.message).await;
    Ok(Json(ChatResponse { response }))
}
