//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what the authentication workflows need from the
//! credential store and the session store; the infrastructure layer provides
//! the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{NewRefreshSession, NewUser, RefreshSession, User, UserCredentials};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by email, including the stored password hash
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<UserCredentials>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Create a new user
    ///
    /// Implementations must enforce uniqueness of both username and email and
    /// report a violation as [`DomainError::UsernameOrEmailTaken`].
    async fn create(&self, user: &NewUser) -> RepoResult<User>;
}

// ============================================================================
// Refresh Session Repository
// ============================================================================

#[async_trait]
pub trait RefreshSessionRepository: Send + Sync {
    /// Insert a session for a freshly issued refresh token
    async fn create(&self, session: &NewRefreshSession) -> RepoResult<RefreshSession>;

    /// Find the session holding the given refresh token
    async fn find_by_token(&self, refresh_token: &str) -> RepoResult<Option<RefreshSession>>;

    /// Delete the session holding the given refresh token.
    ///
    /// Returns whether a row was deleted. Under concurrent callers at most one
    /// of them observes `true`.
    async fn delete_by_token(&self, refresh_token: &str) -> RepoResult<bool>;

    /// Delete a session by id.
    ///
    /// Same at-most-once guarantee as [`Self::delete_by_token`]; token rotation
    /// relies on it.
    async fn delete_by_id(&self, id: i64) -> RepoResult<bool>;

    /// Delete every session of a user, returning how many were removed
    async fn delete_by_user(&self, user_id: i64) -> RepoResult<u64>;

    /// Delete sessions whose refresh token expired at or before `now`
    async fn delete_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}
