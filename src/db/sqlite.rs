// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite pool wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (credential records, unique by college ID)
//! - Test results (screening submissions, append-only)

use crate::db::tables;
use crate::error::AppError;
use crate::models::{NewUser, ScreeningResult, Severity, User};
use crate::time_utils::format_utc_rfc3339;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const MAX_CONNECTIONS: u32 = 8;

/// SQLite database handle. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Connect to the database at `url`, creating the file if needed, and
    /// make sure the schema exists.
    ///
    /// `sqlite::memory:` gets a single long-lived connection, since every
    /// new connection would otherwise open its own empty database.
    pub async fn connect(url: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true);

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(in_memory, "Connected to SQLite");
        Ok(db)
    }

    /// Fresh, isolated in-memory database (for tests).
    pub async fn in_memory() -> Result<Self, AppError> {
        Self::connect("sqlite::memory:").await
    }

    /// Create tables and indexes if they are missing.
    async fn migrate(&self) -> Result<(), AppError> {
        let statements = [
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    college_id TEXT NOT NULL UNIQUE,
                    password_hash TEXT NOT NULL,
                    role TEXT NOT NULL DEFAULT 'student',
                    state TEXT,
                    district TEXT,
                    institute_name TEXT,
                    pincode TEXT,
                    language TEXT,
                    created_at TEXT NOT NULL
                )",
                tables::USERS
            ),
            format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    college_id TEXT NOT NULL,
                    answers TEXT NOT NULL,
                    score INTEGER NOT NULL,
                    severity TEXT NOT NULL,
                    flagged BOOLEAN NOT NULL DEFAULT 0,
                    created_at TEXT NOT NULL
                )",
                tables::TEST_RESULTS
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_test_results_college_id ON {} (college_id)",
                tables::TEST_RESULTS
            ),
            format!(
                "CREATE INDEX IF NOT EXISTS idx_test_results_created_at ON {} (created_at)",
                tables::TEST_RESULTS
            ),
        ];

        for statement in &statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a new user.
    ///
    /// Returns `AppError::Conflict` if the college ID is already taken; the
    /// UNIQUE constraint decides, so concurrent signups cannot both win.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO {} (college_id, password_hash, role, state, district, \
             institute_name, pincode, language, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
            tables::USERS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(&user.college_id)
            .bind(&user.password_hash)
            .bind(&user.role)
            .bind(&user.state)
            .bind(&user.district)
            .bind(&user.institute_name)
            .bind(&user.pincode)
            .bind(&user.language)
            .bind(format_utc_rfc3339(chrono::Utc::now()))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                    AppError::Conflict("User exists".to_string())
                }
                other => AppError::from(other),
            })
    }

    /// Get a user by college ID.
    pub async fn get_user_by_college_id(&self, college_id: &str) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE college_id = ?", tables::USERS);

        Ok(sqlx::query_as::<_, User>(&sql)
            .bind(college_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    // ─── Test Result Operations ──────────────────────────────────

    /// Store a scored submission and return the stored row.
    pub async fn insert_test_result(
        &self,
        college_id: &str,
        answers: &str,
        score: i64,
        severity: Severity,
        flagged: bool,
    ) -> Result<ScreeningResult, AppError> {
        let sql = format!(
            "INSERT INTO {} (college_id, answers, score, severity, flagged, created_at) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING *",
            tables::TEST_RESULTS
        );

        Ok(sqlx::query_as::<_, ScreeningResult>(&sql)
            .bind(college_id)
            .bind(answers)
            .bind(score)
            .bind(severity)
            .bind(flagged)
            .bind(format_utc_rfc3339(chrono::Utc::now()))
            .fetch_one(&self.pool)
            .await?)
    }

    /// Most recent test results, newest first. Results created at the same
    /// instant keep insertion order.
    pub async fn recent_test_results(&self, limit: u32) -> Result<Vec<ScreeningResult>, AppError> {
        let sql = format!(
            "SELECT * FROM {} ORDER BY created_at DESC, id ASC LIMIT ?",
            tables::TEST_RESULTS
        );

        Ok(sqlx::query_as::<_, ScreeningResult>(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?)
    }
}
