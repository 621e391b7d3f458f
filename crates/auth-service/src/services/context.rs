//! Service context - dependency container for the authentication workflows
//!
//! Holds the two stores, the token codec and the password service. Built once
//! at startup and shared by every request.

use std::sync::Arc;

use auth_common::auth::{PasswordService, TokenCodec};
use auth_core::traits::{RefreshSessionRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn RefreshSessionRepository>,
    token_codec: Arc<TokenCodec>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        session_repo: Arc<dyn RefreshSessionRepository>,
        token_codec: Arc<TokenCodec>,
        password_service: PasswordService,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            token_codec,
            password_service,
        }
    }

    /// Start a builder
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    /// Get the user (credential) store
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the refresh-session store
    pub fn session_repo(&self) -> &dyn RefreshSessionRepository {
        self.session_repo.as_ref()
    }

    /// Get the token codec
    pub fn token_codec(&self) -> &TokenCodec {
        self.token_codec.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("token_codec", &self.token_codec)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    session_repo: Option<Arc<dyn RefreshSessionRepository>>,
    token_codec: Option<Arc<TokenCodec>>,
    password_service: Option<PasswordService>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn session_repo(mut self, repo: Arc<dyn RefreshSessionRepository>) -> Self {
        self.session_repo = Some(repo);
        self
    }

    pub fn token_codec(mut self, codec: Arc<TokenCodec>) -> Self {
        self.token_codec = Some(codec);
        self
    }

    pub fn password_service(mut self, service: PasswordService) -> Self {
        self.password_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// The password service falls back to its default.
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if a store or the codec is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::internal("user_repo is required"))?,
            self.session_repo
                .ok_or_else(|| ServiceError::internal("session_repo is required"))?,
            self.token_codec
                .ok_or_else(|| ServiceError::internal("token_codec is required"))?,
            self.password_service.unwrap_or_default(),
        ))
    }
}
