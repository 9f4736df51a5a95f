//! One-way transform applied to presented secrets before comparison.
//!
//! Not a password hash: no salt, no work factor. Stand-in only.
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};

/// sha256(secret) -> URL-safe base64 (no padding)
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Byte-for-byte comparison of `hash_secret(presented)` against the stored value.
pub fn verify_secret(presented: &str, hashed_secret: &str) -> bool {
    hash_secret(presented).as_bytes() == hashed_secret.as_bytes()
}
