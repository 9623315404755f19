use crate::error::AppError;
use bcrypt::{hash, verify};

/// Computes a salted bcrypt hash of `password`. bcrypt embeds a fresh
/// per-account salt and its cost parameters in the hash string.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    Ok(hash(password, 12)?)
}

/// Checks `password` against a stored bcrypt hash. The comparison inside
/// bcrypt is constant-time.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    Ok(verify(password, hashed_password)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "test_password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_salts_are_unique_per_hash() {
        let password = "same_password";
        let first = hash_password(password).unwrap();
        let second = hash_password(password).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        match verify_password("test_password123", "invalidhashformat") {
            Err(AppError::Internal(_)) => {}
            Ok(false) => {
                // bcrypt may also report a malformed hash as a plain
                // verification failure.
            }
            Ok(true) => panic!("verification must not succeed for a malformed hash"),
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
