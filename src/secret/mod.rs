//! Secret verification primitives.
//!
//! Group and post passwords are stored as bcrypt hashes. Comment passwords
//! are stored as plain values and compared in constant time; the two schemes
//! match the data the original frontend was built against and are kept
//! deliberately distinct.

use subtle::ConstantTimeEq;

use crate::errors::AppError;

/// How a resource's stored secret is to be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretScheme {
    /// bcrypt hash, verified with `bcrypt::verify`
    Hashed,
    /// plain stored value, compared in constant time
    Plain,
}

/// Hash a secret with the configured bcrypt cost.
pub fn hash_secret(secret: &str, cost: u32) -> Result<String, AppError> {
    Ok(bcrypt::hash(secret, cost)?)
}

/// Verify a secret against a stored bcrypt hash.
pub fn verify_hashed(secret: &str, hash: &str) -> Result<bool, AppError> {
    Ok(bcrypt::verify(secret, hash)?)
}

/// Constant-time comparison of a supplied secret against a stored plain value.
pub fn verify_plain(secret: &str, stored: &str) -> bool {
    secret.as_bytes().ct_eq(stored.as_bytes()).into()
}

/// Verify a supplied secret under the given scheme.
pub fn verify(scheme: SecretScheme, supplied: &str, stored: &str) -> Result<bool, AppError> {
    match scheme {
        SecretScheme::Hashed => verify_hashed(supplied, stored),
        SecretScheme::Plain => Ok(verify_plain(supplied, stored)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum bcrypt cost, keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_secret("secret1", TEST_COST).unwrap();
        assert_ne!(hash, "secret1");
        assert!(verify_hashed("secret1", &hash).unwrap());
        assert!(!verify_hashed("secret2", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_secret("same", TEST_COST).unwrap();
        let b = hash_secret("same", TEST_COST).unwrap();
        assert_ne!(a, b);
        assert!(verify_hashed("same", &a).unwrap());
        assert!(verify_hashed("same", &b).unwrap());
    }

    #[test]
    fn test_verify_plain() {
        assert!(verify_plain("pw", "pw"));
        assert!(!verify_plain("pw", "pw2"));
        assert!(!verify_plain("", "pw"));
        assert!(verify_plain("", ""));
    }

    #[test]
    fn test_verify_dispatches_on_scheme() {
        let hash = hash_secret("pw", TEST_COST).unwrap();
        assert!(verify(SecretScheme::Hashed, "pw", &hash).unwrap());
        assert!(!verify(SecretScheme::Plain, "pw", &hash).unwrap());
        assert!(verify(SecretScheme::Plain, "pw", "pw").unwrap());
    }
}
