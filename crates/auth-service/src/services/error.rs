//! Service layer error types
//!
//! One variant per failure the authentication workflows can report. Store and
//! codec failures that are not part of that taxonomy are wrapped unchanged.

use auth_common::AppError;
use auth_core::DomainError;
use thiserror::Error;

const TAKEN_MESSAGE: &str = "Name or email is taken";

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request rejected before touching any store
    #[error("Validation error: {0}")]
    Validation(String),

    /// Username or email already registered
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No user with the given email
    #[error("User not found")]
    UserNotFound,

    /// Password did not verify
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, unknown, or already consumed token
    #[error("Not authorized")]
    Unauthorized,

    /// Token presented from the wrong device, or failing verification
    #[error("Forbidden")]
    Forbidden,

    #[error(transparent)]
    Domain(DomainError),

    #[error(transparent)]
    App(AppError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Conflict raised for a taken username or email
    pub fn identifier_taken() -> Self {
        Self::conflict(TAKEN_MESSAGE)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 422,
            Self::Conflict(_) => 409,
            Self::UserNotFound | Self::InvalidCredentials | Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::Domain(e) => {
                if e.is_conflict() {
                    409
                } else {
                    500
                }
            }
            Self::App(e) => e.status_code(),
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses.
    ///
    /// Unknown email and wrong password share a code so callers cannot tell
    /// which accounts exist.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::UserNotFound | Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show a client
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Conflict(msg) => msg.clone(),
            Self::UserNotFound | Self::InvalidCredentials => {
                "Invalid email or password".to_string()
            }
            Self::Unauthorized => "Not authorized!".to_string(),
            Self::Forbidden => "Forbidden.".to_string(),
            _ if self.is_server_error() => "Internal server error".to_string(),
            Self::Domain(e) => e.to_string(),
            Self::App(e) => e.to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::UsernameOrEmailTaken => Self::identifier_taken(),
            other => Self::Domain(other),
        }
    }
}

impl From<AppError> for ServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Domain(e) => Self::from(e),
            other => Self::App(other),
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
