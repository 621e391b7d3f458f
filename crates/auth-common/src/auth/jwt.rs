//! Token codec for access and refresh tokens
//!
//! Both token classes are HS256 JWTs carrying the same minimal claim set, but
//! each class is signed with its own secret so a token of one class never
//! verifies as the other.

use auth_core::User;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AppError, AppResult};

/// Token class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Unique token id, keeps two tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    fn for_user(user: &User, issued_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// A freshly signed token and the instant it stops verifying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_seconds: i64,
}

impl TokenKeys {
    fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }
}

/// Signs and verifies access and refresh tokens.
///
/// Secrets are injected once at construction and never change afterward.
#[derive(Clone)]
pub struct TokenCodec {
    access: TokenKeys,
    refresh: TokenKeys,
    validation: Validation,
}

impl TokenCodec {
    /// Create a codec from the two signing secrets and their lifetimes in seconds
    #[must_use]
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_token_expiry: i64,
        refresh_token_expiry: i64,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            access: TokenKeys::new(access_secret, access_token_expiry),
            refresh: TokenKeys::new(refresh_secret, refresh_token_expiry),
            validation,
        }
    }

    /// Create a codec from the JWT section of the application config
    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.access_secret,
            &config.refresh_secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
    }

    fn keys(&self, kind: TokenKind) -> &TokenKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    /// Lifetime of the given token class in seconds
    #[must_use]
    pub fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        self.keys(kind).ttl_seconds
    }

    /// Sign a token of the given class for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, kind: TokenKind, user: &User) -> AppResult<IssuedToken> {
        let keys = self.keys(kind);
        let now = Utc::now();
        let expiry = now + Duration::seconds(keys.ttl_seconds);
        let claims = Claims::for_user(user, now, expiry);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode JWT: {e}")))?;

        // Report the expiry at the same second precision the token carries
        let expires_at = DateTime::from_timestamp(claims.exp, 0).unwrap_or(expiry);

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry of a token of the given class
    ///
    /// # Errors
    /// Returns `AppError::TokenExpired` for an expired token and
    /// `AppError::InvalidToken` for anything else that fails verification
    pub fn verify(&self, kind: TokenKind, token: &str) -> AppResult<Claims> {
        let keys = self.keys(kind);

        let token_data =
            decode::<Claims>(token, &keys.decoding, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Sign an access token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access(&self, user: &User) -> AppResult<IssuedToken> {
        self.issue(TokenKind::Access, user)
    }

    /// Sign a refresh token
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_refresh(&self, user: &User) -> AppResult<IssuedToken> {
        self.issue(TokenKind::Refresh, user)
    }

    /// Verify an access token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn verify_access(&self, token: &str) -> AppResult<Claims> {
        self.verify(TokenKind::Access, token)
    }

    /// Verify a refresh token
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not a refresh token
    pub fn verify_refresh(&self, token: &str) -> AppResult<Claims> {
        self.verify(TokenKind::Refresh, token)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_token_expiry", &self.access.ttl_seconds)
            .field("refresh_token_expiry", &self.refresh.ttl_seconds)
            .finish_non_exhaustive()
    }
}
