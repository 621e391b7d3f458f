//! Authentication services
//!
//! The orchestrator owning every session invariant, plus its dependency
//! container and error type.

pub mod auth;
pub mod context;
pub mod error;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
