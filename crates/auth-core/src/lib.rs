//! # auth-core
//!
//! Domain layer containing entities, value objects, and the store traits the
//! authentication workflows are written against.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{NewRefreshSession, NewUser, RefreshSession, User, UserCredentials};
pub use error::DomainError;
pub use traits::{RefreshSessionRepository, RepoResult, UserRepository};
pub use value_objects::Fingerprint;
