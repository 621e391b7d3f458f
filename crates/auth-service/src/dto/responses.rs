//! Response DTOs and workflow outcomes

use auth_core::entities::User;
use serde::Serialize;

/// Sanitized user plus a freshly minted access token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithToken {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
    /// Access token lifetime in seconds
    pub token_expiration: i64,
}

/// Body returned by login: `{"user": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub user: UserWithToken,
}

/// Result of a successful login.
///
/// The refresh token travels to the client in a cookie, never in the body.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: User,
    pub refresh_token: String,
}

/// Result of a successful refresh rotation
#[derive(Debug, Clone)]
pub struct RefreshOutcome {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub token_expiration: i64,
}

/// Body returned by refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_expiration: i64,
}

impl From<RefreshOutcome> for RefreshResponse {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            access_token: outcome.access_token,
            token_expiration: outcome.token_expiration,
        }
    }
}

/// Identity resolved from a bearer access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// Plain `{"message": ...}` body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body returned by logout-all
#[derive(Debug, Clone, Serialize)]
pub struct LogoutAllResponse {
    /// Number of refresh sessions deleted
    pub revoked: u64,
}
