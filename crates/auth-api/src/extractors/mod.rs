//! Axum extractors for request handling
//!
//! Bearer authentication, device fingerprinting, and validated JSON bodies.

mod auth;
mod fingerprint;
mod validated;

pub use auth::AuthUser;
pub use fingerprint::{fingerprint_of, ClientFingerprint, FINGERPRINT_HEADERS};
pub use validated::ValidatedJson;
