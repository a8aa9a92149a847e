// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer token authentication middleware.

use crate::db::SqliteDb;
use crate::error::{AppError, AuthFailure};
use crate::models::User;
use crate::services::TokenService;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Authenticated user resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// Extract the token from an `Authorization` header value.
///
/// The scheme is matched case-insensitively, so `bearer abc` is accepted.
pub fn parse_bearer(header: Option<&str>) -> Result<&str, AuthFailure> {
    let value = match header {
        Some(h) if !h.trim().is_empty() => h,
        _ => return Err(AuthFailure::MissingHeader),
    };

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthFailure::InvalidScheme);
    }

    Ok(token.trim())
}

/// Turn an `Authorization` header into a stored user, or reject.
pub async fn resolve(
    db: &SqliteDb,
    tokens: &TokenService,
    header: Option<&str>,
) -> Result<User, AppError> {
    let token = parse_bearer(header).map_err(AppError::Unauthorized)?;

    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::Unauthorized(AuthFailure::InvalidToken)
    })?;

    db.get_user_by_college_id(&claims.college_id)
        .await?
        .ok_or(AppError::Unauthorized(AuthFailure::UnknownUser))
}

/// Middleware that requires a valid bearer token for a known user.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let user = resolve(&state.db, &state.tokens, auth_header).await?;
    request.extensions_mut().insert(AuthUser(user));

    Ok(next.run(request).await)
}
