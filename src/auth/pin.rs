//! PIN hashing and verification.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a PIN with a fresh random salt.
pub fn hash_pin(pin: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(pin.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a PIN against a stored hash. Malformed hashes verify as false
/// rather than erroring; the caller only ever learns pass/fail.
pub fn verify_pin(pin: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(pin.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_pin("40585").unwrap();
        assert!(verify_pin("40585", &hash));
        assert!(!verify_pin("40586", &hash));
    }

    #[test]
    fn same_pin_hashes_differently() {
        let first = hash_pin("12345").unwrap();
        let second = hash_pin("12345").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_never_verifies() {
        assert!(!verify_pin("12345", "not-a-phc-string"));
        assert!(!verify_pin("12345", ""));
    }
}
