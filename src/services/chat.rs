// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat responder.
//!
//! With a provider key configured, messages go to an OpenAI-compatible
//! chat completion endpoint. Any provider failure turns into a fixed
//! apology; without a key, a keyword ladder answers locally.

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You are a calm, empathetic student mental-health assistant.";
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

pub const PROVIDER_FAILURE_REPLY: &str = "Sorry — the AI provider failed. Try again later.";
pub const BREATHING_REPLY: &str = "Try: inhale 4s, hold 4s, exhale 6s. Repeat for 1-2 minutes.";
pub const ANXIETY_REPLY: &str =
    "I understand. Would you like grounding techniques or step-by-step breathing?";
pub const GENERIC_REPLY: &str =
    "I hear you. Tell me more or choose 'breathing' if you'd like an exercise.";

/// Provider call failures. Never shown to clients.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Provider request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Provider response had no message content")]
    EmptyResponse,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat completion provider settings.
#[derive(Clone)]
struct Provider {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Answers chat messages; cheap to clone.
#[derive(Clone)]
pub struct ChatService {
    provider: Option<Provider>,
}

impl ChatService {
    /// Build from config. No provider key means local replies only.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let provider = match &config.openai_api_key {
            Some(api_key) => {
                let http = reqwest::Client::builder()
                    .timeout(config.chat_timeout)
                    .build()
                    .map_err(|e| {
                        AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e))
                    })?;
                Some(Provider {
                    http,
                    api_key: api_key.clone(),
                    model: config.openai_model.clone(),
                    base_url: config.openai_api_url.clone(),
                })
            }
            None => None,
        };

        Ok(Self { provider })
    }

    /// Responder that never calls out.
    pub fn local_only() -> Self {
        Self { provider: None }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Reply to a message. Never fails.
    pub async fn respond(&self, message: &str) -> String {
        let Some(provider) = &self.provider else {
            return fallback_reply(message).to_string();
        };

        match provider.complete(message).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, model = %provider.model, "Chat provider failed");
                PROVIDER_FAILURE_REPLY.to_string()
            }
        }
    }
}

impl Provider {
    async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = CompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyResponse)
    }
}

/// Deterministic reply used when no provider is configured.
///
/// Categories are checked in priority order, so a message mentioning both
/// breathing and anxiety gets the breathing exercise.
pub fn fallback_reply(message: &str) -> &'static str {
    let msg = message.to_lowercase();

    if msg.contains("breath") {
        BREATHING_REPLY
    } else if ["anx", "panic", "worri"].iter().any(|k| msg.contains(k)) {
        ANXIETY_REPLY
    } else {
        GENERIC_REPLY
    }
}
