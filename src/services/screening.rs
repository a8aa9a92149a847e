// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Questionnaire scoring.
//!
//! The score is the plain sum of the answers. Severity tiers are inclusive
//! at the top: up to 5 is low, up to 12 is mild, anything above is high.
//! High results are flagged for review.

use crate::db::SqliteDb;
use crate::error::{AppError, Result};
use crate::models::{ScreeningResult, Severity, User};
use serde::{Deserialize, Serialize};

/// One questionnaire answer as it arrives on the wire.
///
/// Clients send integers; whole-number floats such as `3.0` and numeric
/// strings such as `"3"` are coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Number(i64),
    Float(f64),
    Text(String),
}

impl Answer {
    fn value(&self) -> Result<i64> {
        match self {
            Answer::Number(n) => Ok(*n),
            Answer::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(*f as i64),
            Answer::Float(f) => Err(AppError::BadRequest(format!(
                "Answer '{}' is not an integer",
                f
            ))),
            Answer::Text(s) => s.trim().parse().map_err(|_| {
                AppError::BadRequest(format!("Answer '{}' is not an integer", s))
            }),
        }
    }
}

impl From<i64> for Answer {
    fn from(n: i64) -> Self {
        Answer::Number(n)
    }
}

/// Outcome of scoring a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningScore {
    pub values: Vec<i64>,
    pub score: i64,
    pub severity: Severity,
    pub flagged: bool,
}

impl ScreeningScore {
    /// Answers in storage form, e.g. "3,3".
    pub fn answers_csv(&self) -> String {
        self.values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Score a list of answers. Any non-integer answer fails the whole list.
pub fn score_answers(answers: &[Answer]) -> Result<ScreeningScore> {
    if answers.is_empty() {
        return Err(AppError::BadRequest(
            "Answers must be a non-empty list".to_string(),
        ));
    }

    let values = answers
        .iter()
        .map(Answer::value)
        .collect::<Result<Vec<i64>>>()?;

    let score = values
        .iter()
        .try_fold(0i64, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| AppError::BadRequest("Score out of range".to_string()))?;

    let severity = Severity::from_score(score);

    Ok(ScreeningScore {
        values,
        score,
        severity,
        flagged: severity == Severity::High,
    })
}

/// Score and store a submission for the authenticated user.
pub async fn submit(db: &SqliteDb, caller: &User, answers: &[Answer]) -> Result<ScreeningResult> {
    let scored = score_answers(answers)?;

    let result = db
        .insert_test_result(
            &caller.college_id,
            &scored.answers_csv(),
            scored.score,
            scored.severity,
            scored.flagged,
        )
        .await?;

    if result.flagged {
        tracing::warn!(
            college_id = %result.college_id,
            result_id = result.id,
            score = result.score,
            "Screening result flagged for review"
        );
    } else {
        tracing::info!(
            college_id = %result.college_id,
            result_id = result.id,
            severity = result.severity.as_str(),
            "Screening result stored"
        );
    }

    Ok(result)
}
