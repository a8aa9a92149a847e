// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unauthenticated informational routes.

use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/", get(root))
        .route("/api/helplines", get(helplines))
}

#[derive(Serialize)]
pub struct RootResponse {
    pub ok: bool,
    pub msg: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        ok: true,
        msg: "VisionX backend running",
    })
}

#[derive(Serialize, Clone, Debug)]
pub struct Helpline {
    pub name: &'static str,
    pub number: &'static str,
    pub notes: &'static str,
}

#[derive(Serialize)]
pub struct HelplinesResponse {
    pub helplines: &'static [Helpline],
}

const HELPLINES: &[Helpline] = &[
    Helpline {
        name: "Kashmir Suicide Prevention Helpline (example)",
        number: "+91-0000000000",
        notes: "24/7",
    },
    Helpline {
        name: "Mental Health Helpline (India)",
        number: "08046110007",
        notes: "AIIMS/NCERT list - check local numbers",
    },
    Helpline {
        name: "Text-based support (Example)",
        number: "text HELLO to 56789",
        notes: "Text support",
    },
];

async fn helplines() -> Json<HelplinesResponse> {
    Json(HelplinesResponse {
        helplines: HELPLINES,
    })
}
