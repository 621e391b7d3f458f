//! Device fingerprint extractor
//!
//! Derives an opaque identifier for the calling client from the headers a
//! browser sends unchanged on every request. Network details are left out so
//! a device keeps its fingerprint across networks. Only equality of two
//! fingerprints is ever checked.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use auth_core::Fingerprint;
use sha2::{Digest, Sha256};

/// Headers folded into the fingerprint, in hashing order
pub const FINGERPRINT_HEADERS: [&str; 4] =
    ["user-agent", "accept", "accept-language", "accept-encoding"];

/// Fingerprint of the client making the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint(pub Fingerprint);

#[async_trait]
impl<S> FromRequestParts<S> for ClientFingerprint
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(fingerprint_of(&parts.headers)))
    }
}

/// SHA-256 (hex) over the fingerprint headers
pub fn fingerprint_of(headers: &HeaderMap) -> Fingerprint {
    let mut hasher = Sha256::new();
    for name in FINGERPRINT_HEADERS {
        hasher.update(name.as_bytes());
        hasher.update(b"=");
        if let Some(value) = headers.get(name) {
            hasher.update(value.as_bytes());
        }
        hasher.update(b"\n");
    }

    Fingerprint::new(hex::encode(hasher.finalize()))
}
