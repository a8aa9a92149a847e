// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! VisionX: student mental-health screening backend
//!
//! This crate provides the HTTP API for signup and login, questionnaire
//! scoring, management reports and a supportive chat responder.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SqliteDb;
use services::{ChatService, TokenService};

/// Shared application state.
pub struct AppState {
    pub db: SqliteDb,
    pub tokens: TokenService,
    pub chat: ChatService,
}

impl AppState {
    /// Wire services from config around an already-open database.
    pub fn new(config: &Config, db: SqliteDb) -> Result<Self, error::AppError> {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl);
        let chat = ChatService::new(config)?;

        Ok(Self {
            db,
            tokens,
            chat,
        })
    }
}
