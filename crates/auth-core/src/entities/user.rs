//! User entity - an account that can log in

use chrono::{DateTime, Utc};
use serde::Serialize;

/// User entity without any credential material.
///
/// This is the shape handed back to callers after login; the password hash
/// lives only in [`UserCredentials`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User stamped with the current time
    pub fn new(id: i64, username: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            username: username.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A user together with the stored password hash, as read for login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

impl UserCredentials {
    /// Drop the password hash and keep the sanitized user
    pub fn into_user(self) -> User {
        self.user
    }
}

/// Values needed to insert a user row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
        }
    }
}
