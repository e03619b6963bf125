//! bcrypt hashing helpers
//!
//! bcrypt is CPU bound, so both directions run on `spawn_blocking` to keep
//! the async workers free. Comparison inside `bcrypt::verify` is
//! constant-time.

use crate::error::{AppError, AppResult};

/// bcrypt ignores input past this many bytes
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with a fresh random salt at the given cost
pub async fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(AppError::from)
}

/// Check a password against a stored bcrypt hash
pub async fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {}", e)))?
        .map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify() {
        let hash = hash_password("pw12345", 4).await.unwrap();
        assert!(hash.starts_with("$2b$04$"));
        assert!(verify_password("pw12345", &hash).await.unwrap());
        assert!(!verify_password("pw1234", &hash).await.unwrap());
        assert!(!verify_password("", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_gets_distinct_salts() {
        let first = hash_password("password123", 4).await.unwrap();
        let second = hash_password("password123", 4).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn garbage_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").await.is_err());
    }
}
