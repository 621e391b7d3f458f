//! sqlx error translation

use auth_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Any store failure the caller cannot act on
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// `conflict` for a UNIQUE violation, `DatabaseError` otherwise
pub fn map_unique_violation<F>(e: SqlxError, conflict: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => conflict(),
        _ => map_db_error(e),
    }
}
