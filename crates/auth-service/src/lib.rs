//! # auth-service
//!
//! Application layer: the authentication workflows (register, login, logout,
//! refresh rotation), the dependency container they run against, and the
//! request/response DTOs.

pub mod dto;
pub mod services;

pub use services::{AuthService, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
