//! Random tokens and content hashing.

use std::fmt::Write as _;

use rand::Rng;
use rand::distr::Alphanumeric;
use sha2::{Digest, Sha256};

/// Default length for generated tokens.
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Generate a random alphanumeric token of `length` characters.
///
/// Used for per-form CSRF values and similar throwaway identifiers.
#[must_use]
pub fn generate_token(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// SHA-256 of `data`, hex-encoded.
#[must_use]
pub fn sha256_hex(data: &str) -> String {
    let digest = Sha256::digest(data.as_bytes());
    digest.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}
