//! Application configuration loaded from environment variables.
//!
//! Every setting has a default so the service starts with an empty
//! environment; `.env` is honored for local development.

use std::env;
use std::time::Duration;

/// Secret used when `JWT_SECRET` is unset. Logged as a warning at startup.
pub const DEFAULT_JWT_SECRET: &str = "replace-this-secret";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database URL
    pub database_url: String,
    /// Server port
    pub port: u16,

    // --- Session tokens ---
    /// HS256 signing secret for session tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// Optional token lifetime. `None` issues tokens without `exp`.
    pub token_ttl: Option<Duration>,

    // --- Chat completion provider ---
    /// Provider API key; the keyword fallback is used when absent
    pub openai_api_key: Option<String>,
    /// Provider model name
    pub openai_model: String,
    /// Provider base URL (without `/chat/completions`)
    pub openai_api_url: String,
    /// Upper bound on a single provider call
    pub chat_timeout: Duration,
}

impl Config {
    /// Deterministic config for tests: in-memory database, no provider key.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            port: 8080,
            jwt_secret: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            token_ttl: None,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            openai_api_url: "http://127.0.0.1:9".to_string(),
            chat_timeout: Duration::from_secs(20),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://visionx.db".to_string()),
            port: parse_var("PORT", 8080)?,

            jwt_secret: env::var("JWT_SECRET")
                .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string())
                .into_bytes(),
            token_ttl: optional_var("TOKEN_TTL_HOURS")
                .map(|raw| {
                    raw.parse::<u64>()
                        .map(|hours| Duration::from_secs(hours * 60 * 60))
                        .map_err(|_| ConfigError::Invalid("TOKEN_TTL_HOURS"))
                })
                .transpose()?,

            openai_api_key: optional_var("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_api_url: env::var("OPENAI_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            chat_timeout: Duration::from_secs(parse_var("CHAT_TIMEOUT_SECS", 20)?),
        })
    }

    /// True when the signing secret is still the built-in placeholder.
    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET.as_bytes()
    }
}

/// Read a variable, treating empty or whitespace-only values as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional_var(name) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid(name)),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
