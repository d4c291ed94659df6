//! Argon2id implementation of the hashing port

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::ports::HashService;

/// Fixed input for the dummy hash used against non-existent accounts
const DUMMY_HASH_INPUT: &str = "userkit-timing-safe-dummy";

/// Argon2id hash service
pub struct Argon2HashService {
    dummy_hash: String,
}

impl Argon2HashService {
    pub fn new() -> Self {
        // The dummy hash only needs to be a well-formed Argon2 hash so
        // verification against it takes full verification time.
        let salt = SaltString::generate(&mut OsRng);
        let dummy_hash = Argon2::default()
            .hash_password(DUMMY_HASH_INPUT.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .unwrap_or_default();
        Self { dummy_hash }
    }

    fn hash(text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(text.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| DomainError::HashingFailed {
                reason: err.to_string(),
            })
    }

    fn verify(text: &str, hash: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|err| DomainError::HashingFailed {
            reason: err.to_string(),
        })?;
        Ok(Argon2::default()
            .verify_password(text.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for Argon2HashService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashService for Argon2HashService {
    async fn generate_hash(&self, text: &str) -> DomainResult<String> {
        Self::hash(text)
    }

    async fn compare_hash(&self, text: &str, hash: &str) -> DomainResult<bool> {
        Self::verify(text, hash)
    }

    fn dummy_hash(&self) -> String {
        self.dummy_hash.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_and_verify_roundtrip() {
        let service = Argon2HashService::new();
        let hash = service.generate_hash("secret12").await.unwrap();
        assert_ne!(hash, "secret12");
        assert!(service.compare_hash("secret12", &hash).await.unwrap());
        assert!(!service.compare_hash("wrong", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let service = Argon2HashService::new();
        let a = service.generate_hash("secret12").await.unwrap();
        let b = service.generate_hash("secret12").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn dummy_hash_verifies_nothing_real() {
        let service = Argon2HashService::new();
        let dummy = service.dummy_hash();
        assert!(!dummy.is_empty());
        assert!(!service.compare_hash("any-password", &dummy).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_internal_error() {
        let service = Argon2HashService::new();
        let err = service
            .compare_hash("secret12", "not-a-hash")
            .await
            .unwrap_err();
        assert!(err.is_internal());
    }
}
