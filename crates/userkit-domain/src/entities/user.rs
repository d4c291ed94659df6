//! User entity
//!
//! Immutable: every state change returns a new instance with a
//! refreshed `updated_at`. Fields are validated at construction and the
//! constructors are the only way to obtain an instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use userkit_common::validation::{MaxLengthValidator, NonEmptyStringValidator, Validator};

use crate::errors::{DomainError, DomainResult};
use crate::value_objects::{Email, UserId};

/// Maximum accepted display-name length in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn validate_name(name: &str) -> DomainResult<()> {
    NonEmptyStringValidator::new("name")
        .validate(name)
        .map_err(|_| DomainError::InvalidName {
            reason: "name must not be empty".to_string(),
        })?;
    MaxLengthValidator::new("name", MAX_NAME_LENGTH)
        .validate(name)
        .map_err(|_| DomainError::InvalidName {
            reason: format!("name must be at most {} characters", MAX_NAME_LENGTH),
        })?;
    Ok(())
}

fn validate_password_hash(hash: &str) -> DomainResult<()> {
    if hash.is_empty() {
        return Err(DomainError::InvalidToken {
            reason: "password hash must not be empty".to_string(),
        });
    }
    Ok(())
}

impl User {
    /// Create a new user with a generated ID and fresh timestamps
    pub fn create(email: Email, name: &str, password_hash: String) -> DomainResult<Self> {
        validate_name(name)?;
        validate_password_hash(&password_hash)?;
        let now = Utc::now();
        Ok(Self {
            id: UserId::generate(),
            email,
            name: name.to_string(),
            password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a user from storage, preserving identity and timestamps
    pub fn reconstruct(
        id: UserId,
        email: Email,
        name: String,
        password_hash: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_name(&name)?;
        validate_password_hash(&password_hash)?;
        Ok(Self {
            id,
            email,
            name,
            password_hash,
            created_at,
            updated_at,
        })
    }

    /// Return a new instance with an updated profile
    ///
    /// Absent fields keep their current values. `updated_at` is always
    /// refreshed.
    pub fn with_profile(&self, name: Option<&str>, email: Option<Email>) -> DomainResult<Self> {
        let name = match name {
            Some(name) => {
                validate_name(name)?;
                name.to_string()
            }
            None => self.name.clone(),
        };
        Ok(Self {
            id: self.id.clone(),
            email: email.unwrap_or_else(|| self.email.clone()),
            name,
            password_hash: self.password_hash.clone(),
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }

    /// Return a new instance with a replaced password hash
    pub fn with_password_hash(&self, password_hash: String) -> DomainResult<Self> {
        validate_password_hash(&password_hash)?;
        Ok(Self {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            password_hash,
            created_at: self.created_at,
            updated_at: Utc::now(),
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
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
    use super::*;

    fn sample_user() -> User {
        User::create(
            Email::parse("bob@example.com").unwrap(),
            "Bob",
            "argon2-hash".to_string(),
        )
        .unwrap()
    }

    #[test]
    fn create_sets_equal_timestamps() {
        let user = sample_user();
        assert_eq!(user.created_at(), user.updated_at());
        assert_eq!(user.name(), "Bob");
        assert_eq!(user.email().as_str(), "bob@example.com");
    }

    #[test]
    fn create_rejects_empty_name() {
        let result = User::create(
            Email::parse("bob@example.com").unwrap(),
            "  ",
            "hash".to_string(),
        );
        assert_eq!(result.unwrap_err().code(), "INVALID_NAME");
    }

    #[test]
    fn create_rejects_overlong_name() {
        let result = User::create(
            Email::parse("bob@example.com").unwrap(),
            &"x".repeat(101),
            "hash".to_string(),
        );
        assert_eq!(result.unwrap_err().code(), "INVALID_NAME");
    }

    #[test]
    fn profile_update_refreshes_updated_at_only() {
        let user = sample_user();
        let updated = user.with_profile(Some("Robert"), None).unwrap();

        assert_eq!(updated.id(), user.id());
        assert_eq!(updated.created_at(), user.created_at());
        assert!(updated.updated_at() > updated.created_at());
        assert_eq!(updated.name(), "Robert");
        assert_eq!(updated.email(), user.email());
        // original is untouched
        assert_eq!(user.name(), "Bob");
    }

    #[test]
    fn profile_update_can_change_email() {
        let user = sample_user();
        let updated = user
            .with_profile(None, Some(Email::parse("new@example.com").unwrap()))
            .unwrap();
        assert_eq!(updated.email().as_str(), "new@example.com");
        assert_eq!(updated.name(), "Bob");
    }

    #[test]
    fn password_change_keeps_identity() {
        let user = sample_user();
        let updated = user.with_password_hash("new-hash".to_string()).unwrap();
        assert_eq!(updated.id(), user.id());
        assert_eq!(updated.password_hash(), "new-hash");
        assert!(updated.updated_at() > user.updated_at());
    }

    #[test]
    fn reconstruct_preserves_timestamps() {
        let user = sample_user();
        let rebuilt = User::reconstruct(
            user.id().clone(),
            user.email().clone(),
            user.name().to_string(),
            user.password_hash().to_string(),
            user.created_at(),
            user.updated_at(),
        )
        .unwrap();
        assert_eq!(rebuilt, user);
    }
}
