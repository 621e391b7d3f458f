//! PostgreSQL implementation of RefreshSessionRepository
//!
//! Deletes are single statements, so two callers racing on the same row get
//! one `rows_affected() == 1` and one `0`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use auth_core::entities::{NewRefreshSession, RefreshSession};
use auth_core::error::DomainError;
use auth_core::traits::{RefreshSessionRepository, RepoResult};

use crate::models::RefreshSessionModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of RefreshSessionRepository
#[derive(Clone)]
pub struct PgRefreshSessionRepository {
    pool: PgPool,
}

impl PgRefreshSessionRepository {
    /// Create a new PgRefreshSessionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshSessionRepository for PgRefreshSessionRepository {
    #[instrument(skip(self, session), fields(user_id = session.user_id))]
    async fn create(&self, session: &NewRefreshSession) -> RepoResult<RefreshSession> {
        let model = sqlx::query_as::<_, RefreshSessionModel>(
            r"
            INSERT INTO refresh_sessions (fingerprint, refresh_token, user_id, expires_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, fingerprint, refresh_token, user_id, expires_at, created_at
            ",
        )
        .bind(session.fingerprint.as_str())
        .bind(&session.refresh_token)
        .bind(session.user_id)
        .bind(session.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateRefreshToken))?;

        Ok(RefreshSession::from(model))
    }

    #[instrument(skip_all)]
    async fn find_by_token(&self, refresh_token: &str) -> RepoResult<Option<RefreshSession>> {
        let result = sqlx::query_as::<_, RefreshSessionModel>(
            r"
            SELECT id, fingerprint, refresh_token, user_id, expires_at, created_at
            FROM refresh_sessions
            WHERE refresh_token = $1
            ",
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshSession::from))
    }

    #[instrument(skip_all)]
    async fn delete_by_token(&self, refresh_token: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE refresh_token = $1")
            .bind(refresh_token)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_user(&self, user_id: i64) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_sessions WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        let removed = result.rows_affected();
        debug!(removed, "Expired refresh sessions deleted");
        Ok(removed)
    }
}
