//! API key derivation
//!
//! A key is the lowercase hex SHA-1 digest of a unique seed followed by the
//! Unix time in seconds. The digest length fixes every key at 40 characters.

use chrono::Utc;
use rand::Rng;
use sha1::{Digest, Sha1};

/// Length of every derived API key, in characters
pub const API_KEY_LENGTH: usize = 40;

/// Prefix of every generated seed
const SEED_PREFIX: &str = "ApiKey";

/// Derive an API key from a seed and a Unix timestamp (seconds)
///
/// Pure and deterministic: the same inputs always give the same key.
pub fn derive_api_key(seed: &str, now: i64) -> String {
    let mut hasher = Sha1::new();
    hasher.update(seed.as_bytes());
    hasher.update(now.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Build a unique seed from the microsecond clock and random entropy
pub fn unique_seed() -> String {
    let micros = Utc::now().timestamp_micros();
    let entropy: u64 = rand::thread_rng().gen();
    format!("{SEED_PREFIX}{micros:x}.{entropy:016x}")
}

/// Generate a fresh API key for the current time
pub fn generate_api_key() -> String {
    derive_api_key(&unique_seed(), Utc::now().timestamp())
}

/// Check that a string has the shape of a derived key
pub fn is_well_formed(key: &str) -> bool {
    key.len() == API_KEY_LENGTH
        && key
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
