//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Workflow outcomes carrying values that never reach a JSON body

pub mod requests;
pub mod responses;

pub use requests::{LoginRequest, RegisterRequest};
pub use responses::{
    AuthenticatedUser, LoginOutcome, LogoutAllResponse, MessageResponse, RefreshOutcome,
    RefreshResponse, UserResponse, UserWithToken,
};
