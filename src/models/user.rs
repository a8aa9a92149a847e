//! User model for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role assigned when signup does not name one.
pub const ROLE_STUDENT: &str = "student";
/// Role allowed to read screening reports.
pub const ROLE_MANAGEMENT: &str = "management";
/// Preferred language assigned when signup does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// User record stored in the `users` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    /// College identifier (unique)
    pub college_id: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub role: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub institute_name: Option<String>,
    pub pincode: Option<String>,
    pub language: Option<String>,
    /// When the account was created (RFC3339)
    pub created_at: String,
}

impl User {
    pub fn is_management(&self) -> bool {
        self.role == ROLE_MANAGEMENT
    }

    /// Identity fields that are safe to return to clients.
    pub fn public(&self) -> PublicUser {
        PublicUser {
            college_id: self.college_id.clone(),
            role: self.role.clone(),
        }
    }
}

/// Fields required to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub college_id: String,
    pub password_hash: String,
    pub role: String,
    pub state: Option<String>,
    pub district: Option<String>,
    pub institute_name: Option<String>,
    pub pincode: Option<String>,
    pub language: Option<String>,
}

/// Public identity returned by signup and login. Never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PublicUser {
    pub college_id: String,
    pub role: String,
}
