// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! VisionX API Server
//!
//! Student mental-health screening backend: accounts, questionnaire
//! scoring, management reports and a supportive chat responder.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use visionx_backend::{config::Config, db::SqliteDb, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting VisionX API");

    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set; using the built-in placeholder secret");
    }
    if config.token_ttl.is_none() {
        tracing::warn!("TOKEN_TTL_HOURS not set; session tokens never expire");
    }

    // Open the database and create tables
    let db = SqliteDb::connect(&config.database_url).await?;

    let state = Arc::new(AppState::new(&config, db)?);
    tracing::info!(
        provider = state.chat.has_provider(),
        model = %config.openai_model,
        "Chat responder initialized"
    );

    // Build router
    let app = visionx_backend::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("visionx_backend=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
