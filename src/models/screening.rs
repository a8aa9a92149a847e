// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screening result model.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Severity tier of a screening score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Severity {
    Low,
    Mild,
    High,
}

impl Severity {
    /// Highest score (inclusive) still rated low.
    pub const LOW_MAX: i64 = 5;
    /// Highest score (inclusive) still rated mild.
    pub const MILD_MAX: i64 = 12;

    pub fn from_score(score: i64) -> Self {
        if score <= Self::LOW_MAX {
            Severity::Low
        } else if score <= Self::MILD_MAX {
            Severity::Mild
        } else {
            Severity::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Mild => "mild",
            Severity::High => "high",
        }
    }
}

/// One stored questionnaire submission (`test_results` table).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ScreeningResult {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    /// Submitting user's college identifier
    pub college_id: String,
    /// Comma-joined answer values, e.g. "3,3"
    pub answers: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub score: i64,
    pub severity: Severity,
    pub flagged: bool,
    /// When the result was stored (RFC3339)
    pub created_at: String,
}
