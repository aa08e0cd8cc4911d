//! Session token generation, hashing, and expiry rules.
//!
//! The plaintext token only ever lives in the client's cookie. The store
//! keeps its SHA-256 digest, so a leaked database cannot be replayed as
//! live sessions.

use rand::Rng;
use sha2::{Digest, Sha256};

use crate::types::Timestamp;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "bazaar_session";

/// Length of the generated token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 48;

/// Default session lifetime in hours.
pub const DEFAULT_SESSION_LIFETIME_HOURS: i64 = 12;

/// The result of generating a new session token.
pub struct GeneratedSessionToken {
    /// Sent to the client once, never stored.
    pub plaintext: String,
    /// Stored in `sessions.token_hash`.
    pub hash: String,
}

pub fn generate_session_token() -> GeneratedSessionToken {
    let plaintext: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();
    let hash = hash_session_token(&plaintext);
    GeneratedSessionToken { plaintext, hash }
}

/// Lowercase hex SHA-256 digest of `token`, as stored in `sessions.token_hash`.
pub fn hash_session_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// A session is valid up to, but not including, its expiry instant.
pub fn is_expired(expires_at: Timestamp, now: Timestamp) -> bool {
    expires_at <= now
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn generated_tokens_are_unique_and_hashed() {
        let a = generate_session_token();
        let b = generate_session_token();
        assert_eq!(a.plaintext.len(), TOKEN_LENGTH);
        assert!(a.plaintext.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a.plaintext, b.plaintext);
        assert_eq!(a.hash, hash_session_token(&a.plaintext));
        assert_eq!(a.hash.len(), 64);
    }

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            hash_session_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn expiry_boundary() {
        let now = Utc::now();
        assert!(is_expired(now, now));
        assert!(is_expired(now - Duration::seconds(1), now));
        assert!(!is_expired(now + Duration::seconds(1), now));
    }
}
