use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

use crate::error::ApiError;

/// Hash a password with Argon2id and a fresh random salt, producing a
/// self-describing PHC string for storage.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored PHC hash. An unparseable hash counts
/// as a failed verification, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("hunter22-but-longer").unwrap();
        assert!(verify_password("hunter22-but-longer", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("the-right-password").unwrap();
        assert!(!verify_password("the-wrong-password", &hash));
    }

    #[test]
    fn same_password_hashes_differently_each_time() {
        let a = hash_password("same-password-123").unwrap();
        let b = hash_password("same-password-123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_hash_fails_closed() {
        assert!(!verify_password("whatever", "not-a-phc-string"));
    }
}
