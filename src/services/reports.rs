// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screening reports for management users.

use crate::db::SqliteDb;
use crate::error::{AppError, Result};
use crate::models::{ScreeningResult, User};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Most results a single report returns.
pub const MAX_REPORT_RESULTS: u32 = 500;

#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ReportsResponse {
    pub count: usize,
    pub recent: Vec<ScreeningResult>,
}

/// Recent screening results, newest first. Management only.
pub async fn recent_reports(db: &SqliteDb, caller: &User) -> Result<ReportsResponse> {
    if !caller.is_management() {
        tracing::warn!(
            college_id = %caller.college_id,
            role = %caller.role,
            "Non-management user requested reports"
        );
        return Err(AppError::Forbidden);
    }

    let recent = db.recent_test_results(MAX_REPORT_RESULTS).await?;
    tracing::debug!(count = recent.len(), "Serving screening report");

    Ok(ReportsResponse {
        count: recent.len(),
        recent,
    })
}
