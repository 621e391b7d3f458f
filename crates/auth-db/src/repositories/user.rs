//! PostgreSQL user store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use auth_core::entities::{NewUser, User, UserCredentials};
use auth_core::error::DomainError;
use auth_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_BY_EMAIL: &str = r"
    SELECT id, username, email, password_hash, created_at, updated_at
    FROM users
    WHERE email = $1
";

const SELECT_BY_USERNAME: &str = r"
    SELECT id, username, email, password_hash, created_at, updated_at
    FROM users
    WHERE username = $1
";

// Both UNIQUE constraints surface as the same conflict
const INSERT_USER: &str = r"
    INSERT INTO users (username, email, password_hash)
    VALUES ($1, $2, $3)
    RETURNING id, username, email, password_hash, created_at, updated_at
";

/// `users` table access
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, sql: &str, value: &str) -> RepoResult<Option<UserModel>> {
        sqlx::query_as::<_, UserModel>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserCredentials>> {
        Ok(self
            .fetch_one_by(SELECT_BY_EMAIL, email)
            .await?
            .map(UserCredentials::from))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>> {
        Ok(self
            .fetch_one_by(SELECT_BY_USERNAME, username)
            .await?
            .map(User::from))
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        sqlx::query_as::<_, UserModel>(INSERT_USER)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(|e| map_unique_violation(e, || DomainError::UsernameOrEmailTaken))
    }
}
