// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signup and login.
//!
//! Login deliberately reports the same error for an unknown college ID and
//! a wrong password.

use crate::error::{AppError, Result};
use crate::models::user::{DEFAULT_LANGUAGE, ROLE_STUDENT};
use crate::models::{NewUser, PublicUser};
use crate::services::password::{hash_password, verify_password};
use crate::AppState;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Signup request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64, message = "collegeId must be 1-64 characters"))]
    pub college_id: String,
    #[validate(length(min = 1, max = 256, message = "password must be 1-256 characters"))]
    pub password: String,
    #[validate(length(max = 32))]
    pub role: Option<String>,
    #[validate(length(max = 100))]
    pub state: Option<String>,
    #[validate(length(max = 100))]
    pub district: Option<String>,
    #[validate(length(max = 200))]
    pub institute_name: Option<String>,
    #[validate(length(max = 16))]
    pub pincode: Option<String>,
    #[validate(length(max = 16))]
    pub language: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64, message = "collegeId must be 1-64 characters"))]
    pub college_id: String,
    #[validate(length(min = 1, max = 256, message = "password must be 1-256 characters"))]
    pub password: String,
}

/// Token plus public identity, returned by signup and login.
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Run a password hash/verify off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AppError::Internal(anyhow::Error::from(e)))?
}

/// Treat a blank optional field as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Hash checked when the college ID is unknown, so that failed logins cost
/// the same Argon2 work whether or not the account exists.
fn dummy_hash() -> &'static str {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();
    DUMMY_HASH.get_or_init(|| hash_password("visionx-dummy-password").unwrap_or_default())
}

/// Register a new user and start a session.
pub async fn signup(state: &AppState, req: SignupRequest) -> Result<AuthResponse> {
    if state
        .db
        .get_user_by_college_id(&req.college_id)
        .await?
        .is_some()
    {
        tracing::info!(college_id = %req.college_id, "Signup rejected, user exists");
        return Err(AppError::Conflict("User exists".to_string()));
    }

    let password = req.password;
    let password_hash = blocking(move || hash_password(&password)).await?;

    let new_user = NewUser {
        college_id: req.college_id,
        password_hash,
        role: non_blank(req.role).unwrap_or_else(|| ROLE_STUDENT.to_string()),
        state: req.state,
        district: req.district,
        institute_name: req.institute_name,
        pincode: req.pincode,
        language: Some(non_blank(req.language).unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())),
    };

    // A concurrent signup can still win between the lookup and the insert;
    // the UNIQUE constraint turns that into a Conflict as well.
    let user = state.db.create_user(&new_user).await?;

    let token = state
        .tokens
        .issue(&user.college_id, &user.role)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    tracing::info!(college_id = %user.college_id, role = %user.role, "User signed up");

    Ok(AuthResponse {
        token,
        user: user.public(),
    })
}

/// Check credentials and start a session.
pub async fn login(state: &AppState, req: LoginRequest) -> Result<AuthResponse> {
    let Some(user) = state.db.get_user_by_college_id(&req.college_id).await? else {
        let password = req.password;
        let _ = blocking(move || verify_password(&password, dummy_hash())).await;
        tracing::info!(college_id = %req.college_id, "Login failed, unknown user");
        return Err(AppError::InvalidCredentials);
    };

    let password = req.password;
    let stored_hash = user.password_hash.clone();
    let verified = blocking(move || verify_password(&password, &stored_hash))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(
                college_id = %user.college_id,
                error = %e,
                "Stored password hash unusable"
            );
            false
        });

    if !verified {
        tracing::info!(college_id = %user.college_id, "Login failed, wrong password");
        return Err(AppError::InvalidCredentials);
    }

    let token = state
        .tokens
        .issue(&user.college_id, &user.role)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;

    tracing::info!(college_id = %user.college_id, "User logged in");

    Ok(AuthResponse {
        token,
        user: user.public(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(String::new())), None);
        assert_eq!(non_blank(Some("  ".to_string())), None);
        assert_eq!(non_blank(Some("hi".to_string())), Some("hi".to_string()));
    }

    #[test]
    fn test_dummy_hash_is_real_and_stable() {
        let hash = dummy_hash();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(hash, dummy_hash());
        assert!(!verify_password("guess", hash).unwrap());
    }
}
