use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand_core::OsRng;

use crate::error::{AuthError, Result};

/// Hash a password with Argon2id and a fresh random salt.
///
/// The returned PHC string embeds the algorithm, cost parameters, salt and
/// digest, so verification needs nothing beyond the string itself. Any byte
/// sequence is accepted, including the empty one; password policy is not this
/// layer's job.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a password against a stored PHC hash string.
///
/// A mismatch is `Ok(false)`, not an error. Only a malformed hash encoding or
/// an internal hashing failure produces `Err` — callers must be able to tell
/// "wrong password" apart from "the stored hash is garbage".
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "my_secure_password";
        let hash = hash_password(password).unwrap();

        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_different_hashes() {
        let password = "same_password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();

        // Different salts should produce different encodings
        assert_ne!(hash1, hash2);

        // But both should verify correctly
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_empty_password_is_accepted() {
        let hash = hash_password("").unwrap();

        assert!(verify_password("", &hash).unwrap());
        assert!(!verify_password("not empty", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error_not_a_mismatch() {
        let result = verify_password("anything", "not-a-phc-string");
        assert!(matches!(result, Err(AuthError::Hashing(_))));
    }

    #[test]
    fn test_hash_looks_like_argon2id() {
        let hash = hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
    }
}
