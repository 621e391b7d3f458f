//! Domain errors - error types reported by the stores

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Conflict Errors
    // =========================================================================
    /// Raised by the user store's uniqueness guard on insert
    #[error("Username or email already in use")]
    UsernameOrEmailTaken,

    #[error("Refresh token already has a session")]
    DuplicateRefreshToken,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UsernameOrEmailTaken => "IDENTIFIER_TAKEN",
            Self::DuplicateRefreshToken => "DUPLICATE_REFRESH_TOKEN",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameOrEmailTaken | Self::DuplicateRefreshToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::UsernameOrEmailTaken.code(), "IDENTIFIER_TAKEN");
        assert_eq!(
            DomainError::DatabaseError("boom".to_string()).code(),
            "DATABASE_ERROR"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::UsernameOrEmailTaken.is_conflict());
        assert!(DomainError::DuplicateRefreshToken.is_conflict());
        assert!(!DomainError::DatabaseError("x".to_string()).is_conflict());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::UsernameOrEmailTaken.to_string(),
            "Username or email already in use"
        );
    }
}
