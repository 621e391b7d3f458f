//! Value objects

mod fingerprint;

pub use fingerprint::Fingerprint;
