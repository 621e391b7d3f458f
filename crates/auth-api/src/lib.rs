//! # auth-api
//!
//! REST API server built with Axum framework. Exposes the session workflows
//! under `/users` and carries the refresh token in an HTTP-only cookie.

pub mod cookies;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, run};
pub use state::AppState;
