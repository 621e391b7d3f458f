//! Database models - SQLx-compatible structs for PostgreSQL tables

mod refresh_session;
mod user;

pub use refresh_session::RefreshSessionModel;
pub use user::UserModel;
