//! Credential hashing port

use async_trait::async_trait;

use crate::errors::DomainResult;

/// One-way hashing of credentials and tokens
#[async_trait]
pub trait HashService: Send + Sync {
    /// Hash a plaintext value
    async fn generate_hash(&self, text: &str) -> DomainResult<String>;

    /// Compare a plaintext value against a previously generated hash
    async fn compare_hash(&self, text: &str, hash: &str) -> DomainResult<bool>;

    /// A well-formed hash of a throwaway value
    ///
    /// Compared against when the looked-up account does not exist, so
    /// sign-in takes comparable time for unknown and known emails.
    fn dummy_hash(&self) -> String;
}
