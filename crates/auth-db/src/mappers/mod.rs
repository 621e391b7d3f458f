//! Model to entity mappers
//!
//! `From<Model>` conversions turning database rows into `auth-core` entities.
//! The password hash only survives into [`auth_core::UserCredentials`].

mod refresh_session;
mod user;
