//! Domain entities

mod refresh_session;
mod user;

pub use refresh_session::{NewRefreshSession, RefreshSession};
pub use user::{NewUser, User, UserCredentials};
