//! Authentication service
//!
//! Register, login, logout and refresh rotation. Every failure decision of the
//! session lifecycle is made here; the stores only report what they hold.

use auth_common::TokenKind;
use auth_core::entities::{NewRefreshSession, NewUser, User, UserCredentials};
use auth_core::value_objects::Fingerprint;
use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::dto::{
    AuthenticatedUser, LoginOutcome, LoginRequest, RefreshOutcome, RegisterRequest, UserResponse,
    UserWithToken,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// Both identifiers are checked before any write. The store's uniqueness
    /// guard still has the last word when two registrations race.
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<User> {
        if request.password != request.confirmed_password {
            warn!("Registration rejected: passwords differ");
            return Err(ServiceError::validation("Password didn't match"));
        }

        let by_email = self.ctx.user_repo().find_by_email(&request.email).await?;
        let by_username = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await?;

        if by_email.is_some() || by_username.is_some() {
            warn!("Registration rejected: identifier taken");
            return Err(ServiceError::identifier_taken());
        }

        let password_hash = self.hash_password(request.password).await?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::new(request.username, request.email, password_hash))
            .await?;

        info!(user_id = user.id, "User registered successfully");
        Ok(user)
    }

    /// Login with email and password, binding a new refresh session to the
    /// caller's fingerprint
    #[instrument(skip(self, request, fingerprint), fields(email = %request.email))]
    pub async fn login(
        &self,
        request: LoginRequest,
        fingerprint: &Fingerprint,
    ) -> ServiceResult<LoginOutcome> {
        let UserCredentials {
            user,
            password_hash,
        } = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::UserNotFound
            })?;

        if !self.verify_password(request.password, password_hash).await? {
            warn!(user_id = user.id, "Login failed: invalid password");
            return Err(ServiceError::InvalidCredentials);
        }

        let refresh = self.ctx.token_codec().issue_refresh(&user)?;

        self.ctx
            .session_repo()
            .create(&NewRefreshSession::new(
                fingerprint.clone(),
                refresh.token.clone(),
                user.id,
                refresh.expires_at,
            ))
            .await?;

        info!(user_id = user.id, "User logged in successfully");

        Ok(LoginOutcome {
            user,
            refresh_token: refresh.token,
        })
    }

    /// Mint an access token for a user and wrap it in the login body
    pub fn build_user_response(&self, user: User) -> ServiceResult<UserResponse> {
        let access = self.ctx.token_codec().issue_access(&user)?;

        Ok(UserResponse {
            user: UserWithToken {
                user,
                token: access.token,
                token_expiration: self.ctx.token_codec().ttl_seconds(TokenKind::Access),
            },
        })
    }

    /// Delete the session holding the refresh token, if any.
    ///
    /// Idempotent: an absent or unknown token is a successful no-op. Access
    /// tokens already handed out stay valid until they expire.
    #[instrument(skip_all)]
    pub async fn logout(&self, refresh_token: Option<&str>) -> ServiceResult<()> {
        let Some(token) = refresh_token else {
            debug!("Logout without refresh token");
            return Ok(());
        };

        let removed = self.ctx.session_repo().delete_by_token(token).await?;
        info!(removed, "User logged out");
        Ok(())
    }

    /// Delete every refresh session of a user
    #[instrument(skip(self))]
    pub async fn logout_all(&self, user_id: i64) -> ServiceResult<u64> {
        let revoked = self.ctx.session_repo().delete_by_user(user_id).await?;
        info!(revoked, "All sessions revoked");
        Ok(revoked)
    }

    /// Rotate a refresh token.
    ///
    /// Checks run in a fixed order and the first failure wins:
    /// absent token, unknown session, fingerprint mismatch, failed
    /// verification. The consumed session is then deleted by id; only the
    /// caller whose delete reports a row goes on to mint new tokens.
    ///
    /// A failure after the delete leaves the old session gone without a
    /// replacement, and the client has to log in again.
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        refresh_token: Option<&str>,
        fingerprint: &Fingerprint,
    ) -> ServiceResult<RefreshOutcome> {
        let Some(current) = refresh_token.filter(|t| !t.is_empty()) else {
            warn!("Refresh rejected: no token");
            return Err(ServiceError::Unauthorized);
        };

        let session = self
            .ctx
            .session_repo()
            .find_by_token(current)
            .await?
            .ok_or_else(|| {
                warn!("Refresh rejected: no session for token");
                ServiceError::Unauthorized
            })?;

        if !session.is_bound_to(fingerprint) {
            warn!(
                session_id = session.id,
                user_id = session.user_id,
                "Refresh rejected: fingerprint mismatch"
            );
            return Err(ServiceError::Forbidden);
        }

        let claims = self
            .ctx
            .token_codec()
            .verify_refresh(current)
            .map_err(|e| {
                warn!(
                    session_id = session.id,
                    error = %e,
                    "Refresh rejected: token failed verification"
                );
                ServiceError::Forbidden
            })?;

        if !self.ctx.session_repo().delete_by_id(session.id).await? {
            warn!(session_id = session.id, "Refresh rejected: session already consumed");
            return Err(ServiceError::Unauthorized);
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&claims.username)
            .await?
            .ok_or_else(|| {
                warn!(user_id = claims.id, "Refresh rejected: user no longer exists");
                ServiceError::Unauthorized
            })?;

        let codec = self.ctx.token_codec();
        let access = codec.issue_access(&user)?;
        let refresh = codec.issue_refresh(&user)?;

        self.ctx
            .session_repo()
            .create(&NewRefreshSession::new(
                session.fingerprint,
                refresh.token.clone(),
                user.id,
                refresh.expires_at,
            ))
            .await?;

        info!(user_id = user.id, "Refresh token rotated");

        Ok(RefreshOutcome {
            access_token: access.token,
            refresh_token: refresh.token,
            token_expiration: codec.ttl_seconds(TokenKind::Access),
        })
    }

    /// Resolve a bearer access token to its user.
    ///
    /// The user is re-read so a token outliving its account is refused.
    #[instrument(skip_all)]
    pub async fn authenticate(&self, access_token: &str) -> ServiceResult<AuthenticatedUser> {
        let claims = self
            .ctx
            .token_codec()
            .verify_access(access_token)
            .map_err(|e| {
                debug!(error = %e, "Bearer token rejected");
                ServiceError::Unauthorized
            })?;

        let user = self
            .ctx
            .user_repo()
            .find_by_username(&claims.username)
            .await?
            .filter(|user| user.id == claims.id)
            .ok_or_else(|| {
                warn!(user_id = claims.id, "Bearer token for unknown user");
                ServiceError::Unauthorized
            })?;

        Ok(AuthenticatedUser::from(&user))
    }

    /// Delete sessions whose refresh token has expired
    #[instrument(skip(self))]
    pub async fn purge_expired_sessions(&self) -> ServiceResult<u64> {
        let removed = self.ctx.session_repo().delete_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Purged expired refresh sessions");
        }
        Ok(removed)
    }

    async fn hash_password(&self, password: String) -> ServiceResult<String> {
        let hasher = self.ctx.password_service().clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| ServiceError::internal(format!("Password hashing task failed: {e}")))?
            .map_err(ServiceError::from)
    }

    async fn verify_password(&self, password: String, hash: String) -> ServiceResult<bool> {
        let verifier = self.ctx.password_service().clone();
        tokio::task::spawn_blocking(move || verifier.verify(&password, &hash))
            .await
            .map_err(|e| ServiceError::internal(format!("Password verification task failed: {e}")))
    }
}
