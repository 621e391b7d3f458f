//! Refresh session database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for refresh_sessions table
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSessionModel {
    pub id: i64,
    pub fingerprint: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
