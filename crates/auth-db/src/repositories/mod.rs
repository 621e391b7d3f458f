//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in auth-core.

mod error;
mod refresh_session;
mod user;

pub use refresh_session::PgRefreshSessionRepository;
pub use user::PgUserRepository;
