// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session token issuing and verification (HS256 JWT).
//!
//! Tokens carry the college ID and role. They have no expiry unless a TTL
//! is configured, and are never revoked server-side.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// College identifier of the session owner
    #[serde(default)]
    pub college_id: String,
    /// Role at the time the token was issued
    #[serde(default)]
    pub role: String,
    /// Issued at (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    /// Expiration time (Unix timestamp), only with a configured TTL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("Token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Token has no college_id claim")]
    MissingSubject,

    #[error("System time error: {0}")]
    Clock(#[from] std::time::SystemTimeError),
}

/// Issues and verifies session tokens with a symmetric secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Option<Duration>,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Option<Duration>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Create a signed token for a user session.
    pub fn issue(&self, college_id: &str, role: &str) -> Result<String, TokenError> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();

        let claims = Claims {
            college_id: college_id.to_string(),
            role: role.to_string(),
            iat: Some(now),
            exp: self.ttl.map(|ttl| now + ttl.as_secs()),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Encode)
    }

    /// Check signature, algorithm and (with a TTL) expiry, and return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        if self.ttl.is_some() {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.required_spec_claims.clear();
            validation.validate_exp = false;
        }

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Invalid)?;

        if token_data.claims.college_id.is_empty() {
            return Err(TokenError::MissingSubject);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_signing_key_32_bytes_long!!";

    #[test]
    fn test_issue_then_verify() {
        let tokens = TokenService::new(SECRET, None);
        let token = tokens.issue("C-100", "student").unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.college_id, "C-100");
        assert_eq!(claims.role, "student");
        assert!(claims.iat.is_some());
        assert!(claims.exp.is_none(), "no expiry without a TTL");
    }

    #[test]
    fn test_ttl_sets_expiry() {
        let tokens = TokenService::new(SECRET, Some(Duration::from_secs(3600)));
        let claims = tokens.verify(&tokens.issue("C-1", "student").unwrap()).unwrap();

        let (iat, exp) = (claims.iat.unwrap(), claims.exp.unwrap());
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = TokenService::new(SECRET, None).issue("C-1", "student").unwrap();
        let other = TokenService::new(b"some_other_secret", None);

        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let tokens = TokenService::new(SECRET, None);
        assert!(tokens.verify("not-a-jwt").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn test_empty_college_id_rejected() {
        let tokens = TokenService::new(SECRET, None);
        let token = tokens.issue("", "student").unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::MissingSubject)));
    }

    #[test]
    fn test_ttl_mode_requires_exp() {
        let no_exp = TokenService::new(SECRET, None).issue("C-1", "student").unwrap();
        let strict = TokenService::new(SECRET, Some(Duration::from_secs(60)));

        assert!(strict.verify(&no_exp).is_err());
    }
}
