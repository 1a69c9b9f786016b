//! Password hashing and verification.
//!
//! Stored hashes are PHC strings produced by argon2id. Verification never
//! reports why it failed; an unparsable hash and a wrong password both come
//! back as `false`.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Hashes a plaintext password for storage.
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    if plain.is_empty() {
        return Err(AuthError::internal("password must not be empty"));
    }
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::internal(format!("failed to hash password: {e}")))?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash string.
#[must_use]
pub fn verify_password(plain: &str, hash: &str) -> bool {
    if plain.is_empty() || hash.is_empty() {
        return false;
    }
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("s3cure-pa55").unwrap();
        assert!(verify_password("s3cure-pa55", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn empty_inputs_never_verify() {
        let hash = hash_password("something").unwrap();
        assert!(!verify_password("", &hash));
        assert!(!verify_password("something", ""));
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    #[test]
    fn empty_password_cannot_be_hashed() {
        assert!(hash_password("").is_err());
    }
}
