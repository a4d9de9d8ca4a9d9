use bcrypt::{hash, DEFAULT_COST};

use super::error::AppError;

/// Hashes a plain-text password for storage
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash(plain, DEFAULT_COST)
        .map_err(|e| AppError::StorageError(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_verifiable() {
        let hashed = hash_password("s3cret-pass").unwrap();
        assert_ne!(hashed, "s3cret-pass");
        assert!(bcrypt::verify("s3cret-pass", &hashed).unwrap());
    }
}
