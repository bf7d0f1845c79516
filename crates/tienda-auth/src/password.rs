//! Password hashing.
//!
//! New passwords are stored as argon2 PHC strings. Records written before
//! hashing was introduced hold the password in plain text; those still
//! verify, and [`PasswordHasher::needs_rehash`] tells callers to upgrade them.

use crate::AuthError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordVerifier};

const PHC_PREFIX: &str = "$argon2";

/// Argon2 password hasher with a plain-text fallback for legacy records.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password into a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        use argon2::PasswordHasher as _;

        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    /// Check a password against a stored value.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if !Self::is_hashed(stored) {
            return constant_time_compare(password.as_bytes(), stored.as_bytes());
        }
        match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash is malformed");
                false
            }
        }
    }

    /// Whether a stored value is an argon2 hash.
    pub fn is_hashed(stored: &str) -> bool {
        stored.starts_with(PHC_PREFIX)
    }

    /// Whether a stored value should be replaced with a fresh hash.
    pub fn needs_rehash(stored: &str) -> bool {
        !Self::is_hashed(stored)
    }
}

/// Constant-time comparison to prevent timing attacks.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = PasswordHasher::new();
        let hash = hasher.hash("clave123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(hasher.verify("clave123", &hash));
        assert!(!hasher.verify("clave124", &hash));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hasher = PasswordHasher::new();
        let first = hasher.hash("clave123").unwrap();
        let second = hasher.hash("clave123").unwrap();
        assert_ne!(first, second);
        assert!(hasher.verify("clave123", &second));
    }

    #[test]
    fn test_legacy_plain_text() {
        let hasher = PasswordHasher::new();
        assert!(hasher.verify("1234", "1234"));
        assert!(!hasher.verify("12345", "1234"));
        assert!(PasswordHasher::needs_rehash("1234"));
    }

    #[test]
    fn test_malformed_hash_rejects() {
        assert!(!PasswordHasher::new().verify("x", "$argon2id$garbage"));
    }
}
