//! Buyer verification tokens.
//!
//! A token proves the caller knows the shared secret for a given email:
//! `token = hex(sha256(email || secret))`, lowercase.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Computes the expected token for `email` under `secret`.
pub fn expected_token(email: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a caller-supplied token against the expected one.
///
/// Exact string match, compared in constant time.
pub fn token_matches(email: &str, secret: &str, token: &str) -> bool {
    let expected = expected_token(email, secret);
    expected.as_bytes().ct_eq(token.as_bytes()).into()
}
