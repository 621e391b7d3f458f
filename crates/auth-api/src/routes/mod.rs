//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{health, users};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/users", user_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Session routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/logout-all", post(users::logout_all))
        .route("/refresh", get(users::refresh))
        .route("/me", get(users::me))
}
