//! Salted SHA-256 digests for masking and pseudonymization.
//!
//! The digest input is the value's canonical text with the salt appended
//! (`value || salt`), hashed as UTF-8 and hex-encoded in lowercase. Every
//! entry point below routes through [`digest_str`], so they agree bit for bit.

use crate::Value;
use sha2::{Digest, Sha256};

/// Salt used when a rule does not override it.
pub const DEFAULT_SALT: &str = "default_salt";

/// Length of a hex-encoded SHA-256 digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// Digest a string with the given salt (or [`DEFAULT_SALT`]).
pub fn digest_str(value: &str, salt: Option<&str>) -> String {
    let salt = salt.unwrap_or(DEFAULT_SALT);
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Digest a scalar value. `Null` propagates as `None`.
pub fn hash_sha256(value: &Value, salt: Option<&str>) -> Option<String> {
    value.canonical().map(|text| digest_str(&text, salt))
}

/// Mask a value. Alias of [`hash_sha256`].
pub fn mask_value(value: &Value, salt: Option<&str>) -> Option<String> {
    hash_sha256(value, salt)
}

/// Pseudonymize a value. Alias of [`hash_sha256`].
pub fn pseudonymize_value(value: &Value, salt: Option<&str>) -> Option<String> {
    hash_sha256(value, salt)
}
