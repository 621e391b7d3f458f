//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, IssuedToken, TokenCodec, TokenKind};
pub use password::PasswordService;
