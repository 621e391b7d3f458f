//! Store traits (ports)

mod repositories;

pub use repositories::{RefreshSessionRepository, RepoResult, UserRepository};
