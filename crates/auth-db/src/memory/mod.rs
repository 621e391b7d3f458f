//! In-process store adapters
//!
//! Same contracts as the PostgreSQL repositories, held in memory. Used by the
//! service and HTTP test suites and for running the API without a database.

mod refresh_session;
mod user;

pub use refresh_session::InMemoryRefreshSessionRepository;
pub use user::InMemoryUserRepository;
