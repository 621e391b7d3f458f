//! One-way password hashing with Argon2id
//!
//! Stored hashes are PHC strings: algorithm, cost parameters and salt travel
//! with the digest, so a hash made under older parameters still verifies.

use std::fmt;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::error::AppError;

/// Hashes and verifies account passwords.
///
/// Both operations are CPU-bound; async callers should run them on a
/// blocking thread.
#[derive(Clone, Default)]
pub struct PasswordService {
    argon2: Argon2<'static>,
}

impl PasswordService {
    /// Argon2id with the crate's default cost
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Argon2id with explicit cost parameters
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Salted hash of `password` as a PHC string
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::internal(anyhow::anyhow!("Password hashing failed: {e}")))
    }

    /// Whether `password` matches `hash`.
    ///
    /// A mismatch is `false`, never an error. So is a stored hash that does
    /// not parse.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is malformed");
                false
            }
        }
    }
}

impl fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordService")
            .field("algorithm", &Algorithm::Argon2id)
            .finish_non_exhaustive()
    }
}
