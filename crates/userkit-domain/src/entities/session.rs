//! User session entity
//!
//! Holds hashed credentials only; raw tokens never enter the domain.
//! Expiry checks are evaluated against wall-clock time at call time and
//! never cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{SessionId, UserId};

/// Authentication session for one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    id: SessionId,
    user_id: UserId,
    access_token_hash: String,
    access_token_expire_at: DateTime<Utc>,
    reset_token_hash: Option<String>,
    reset_token_expire_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn validate_token_hash(label: &str, hash: &str) -> DomainResult<()> {
    if hash.is_empty() {
        return Err(DomainError::InvalidToken {
            reason: format!("{} hash must not be empty", label),
        });
    }
    Ok(())
}

impl UserSession {
    /// Create a new session with a generated ID and fresh timestamps
    pub fn create(
        user_id: UserId,
        access_token_hash: String,
        access_token_expire_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_token_hash("access token", &access_token_hash)?;
        let now = Utc::now();
        Ok(Self {
            id: SessionId::generate(),
            user_id,
            access_token_hash,
            access_token_expire_at,
            reset_token_hash: None,
            reset_token_expire_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a session from storage
    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: SessionId,
        user_id: UserId,
        access_token_hash: String,
        access_token_expire_at: DateTime<Utc>,
        reset_token_hash: Option<String>,
        reset_token_expire_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_token_hash("access token", &access_token_hash)?;
        if let Some(hash) = &reset_token_hash {
            validate_token_hash("reset token", hash)?;
        }
        Ok(Self {
            id,
            user_id,
            access_token_hash,
            access_token_expire_at,
            reset_token_hash,
            reset_token_expire_at,
            created_at,
            updated_at,
        })
    }

    /// Return a new instance with a rotated access token
    pub fn with_access_token(
        &self,
        access_token_hash: String,
        access_token_expire_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_token_hash("access token", &access_token_hash)?;
        Ok(Self {
            access_token_hash,
            access_token_expire_at,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Return a new instance carrying a password reset token
    pub fn with_reset_token(
        &self,
        reset_token_hash: String,
        reset_token_expire_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_token_hash("reset token", &reset_token_hash)?;
        Ok(Self {
            reset_token_hash: Some(reset_token_hash),
            reset_token_expire_at: Some(reset_token_expire_at),
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    /// Return a new instance with the reset token cleared
    pub fn without_reset_token(&self) -> Self {
        Self {
            reset_token_hash: None,
            reset_token_expire_at: None,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    /// Whether the access token is still within its lifetime, evaluated
    /// against the current wall-clock time
    pub fn is_access_token_valid(&self) -> bool {
        Utc::now() < self.access_token_expire_at
    }

    /// Whether a reset token is present and within its lifetime
    pub fn is_reset_token_valid(&self) -> bool {
        match (&self.reset_token_hash, self.reset_token_expire_at) {
            (Some(_), Some(expire_at)) => Utc::now() < expire_at,
            _ => false,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn access_token_hash(&self) -> &str {
        &self.access_token_hash
    }

    pub fn access_token_expire_at(&self) -> DateTime<Utc> {
        self.access_token_expire_at
    }

    pub fn reset_token_hash(&self) -> Option<&str> {
        self.reset_token_hash.as_deref()
    }

    pub fn reset_token_expire_at(&self) -> Option<DateTime<Utc>> {
        self.reset_token_expire_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn sample_session(expires_in: Duration) -> UserSession {
        UserSession::create(
            UserId::generate(),
            "access-hash".to_string(),
            Utc::now() + expires_in,
        )
        .unwrap()
    }

    #[test]
    fn create_rejects_empty_access_hash() {
        let result = UserSession::create(UserId::generate(), String::new(), Utc::now());
        assert_eq!(result.unwrap_err().code(), "INVALID_TOKEN");
    }

    #[test]
    fn access_token_validity_follows_clock() {
        assert!(sample_session(Duration::minutes(5)).is_access_token_valid());
        assert!(!sample_session(Duration::minutes(-5)).is_access_token_valid());
    }

    #[test]
    fn reset_token_absent_is_invalid() {
        let session = sample_session(Duration::minutes(5));
        assert!(!session.is_reset_token_valid());
    }

    #[test]
    fn reset_token_roundtrip() {
        let session = sample_session(Duration::minutes(5));
        let with_reset = session
            .with_reset_token("reset-hash".to_string(), Utc::now() + Duration::minutes(30))
            .unwrap();
        assert!(with_reset.is_reset_token_valid());
        assert_eq!(with_reset.reset_token_hash(), Some("reset-hash"));

        let cleared = with_reset.without_reset_token();
        assert!(!cleared.is_reset_token_valid());
        assert_eq!(cleared.reset_token_hash(), None);
        // access credentials survive reset-token changes
        assert_eq!(cleared.access_token_hash(), "access-hash");
    }

    #[test]
    fn expired_reset_token_is_invalid() {
        let session = sample_session(Duration::minutes(5))
            .with_reset_token("reset-hash".to_string(), Utc::now() - Duration::minutes(1))
            .unwrap();
        assert!(!session.is_reset_token_valid());
    }

    #[test]
    fn token_rotation_keeps_identity() {
        let session = sample_session(Duration::minutes(5));
        let rotated = session
            .with_access_token("new-hash".to_string(), Utc::now() + Duration::minutes(10))
            .unwrap();
        assert_eq!(rotated.id(), session.id());
        assert_eq!(rotated.user_id(), session.user_id());
        assert_eq!(rotated.access_token_hash(), "new-hash");
        assert!(rotated.updated_at() >= session.updated_at());
    }
}
