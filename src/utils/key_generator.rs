//! Deterministic short key derivation.
//!
//! A key is the first [`KEY_LENGTH`] lowercase hex characters of the MD5
//! digest of the long URL followed by [`PROBE_SALT`] repeated `probe` times.
//! The digest is a content fingerprint, not a security boundary.
//!
//! Probing starts at 0, so the first candidate for a URL is the digest of the
//! URL itself. Collision handling lives in
//! [`crate::application::services::KeyGenerator`].

use md5::{Digest, Md5};
use regex::Regex;
use std::sync::LazyLock;

/// Number of hex characters kept from the digest.
pub const KEY_LENGTH: usize = 7;

/// Literal appended once per probe to move to the next candidate.
pub const PROBE_SALT: &str = "Xa1";

static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{1,7}$").expect("valid key pattern"));

/// Computes the candidate key for `long_url` at the given probe.
///
/// Pure: identical inputs always produce the identical key.
///
/// # Examples
///
/// ```ignore
/// // md5("https://www.example.com/shop") = 3174bab09c13...
/// assert_eq!(generate_key("https://www.example.com/shop", 0), "3174bab");
/// ```
pub fn generate_key(long_url: &str, probe: u32) -> String {
    let mut hasher = Md5::new();
    hasher.update(long_url.as_bytes());
    for _ in 0..probe {
        hasher.update(PROBE_SALT.as_bytes());
    }

    let mut key = hex::encode(hasher.finalize());
    key.truncate(KEY_LENGTH);
    key
}

/// Returns true if `key` could have been produced by [`generate_key`].
///
/// Anything else can never exist in the store, so lookups can stop early.
pub fn is_valid_key(key: &str) -> bool {
    KEY_PATTERN.is_match(key)
}
