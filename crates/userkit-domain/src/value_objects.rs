//! Value objects representing immutable domain concepts
//!
//! Identifiers are opaque validated strings. `UserId` and `SessionId`
//! are distinct newtypes, so an identifier of one kind can never compare
//! equal to an identifier of another kind even when the underlying
//! strings coincide.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use userkit_common::validation::{DisallowedCharsValidator, MaxLengthValidator, Validator};

use crate::errors::{DomainError, DomainResult};

/// Maximum accepted email length per RFC 5321
const EMAIL_MAX_LENGTH: usize = 254;

/// Characters rejected outright before the format check
const EMAIL_FORBIDDEN_CHARS: &[char] = &['<', '>', '"', '\'', ',', ';', '(', ')', '\\'];

static EMAIL_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9!#$%&*+/=?^_`{|}~.-]+@[a-z0-9-]+(\.[a-z0-9-]+)+$")
        .expect("email regex is valid")
});

/// Validated, lowercase-normalized email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Parse and normalize an email address
    ///
    /// Trims surrounding whitespace and lowercases before validating.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let normalized = input.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(DomainError::InvalidEmail {
                reason: "email must not be empty".to_string(),
            });
        }
        MaxLengthValidator::new("email", EMAIL_MAX_LENGTH)
            .validate(normalized.as_str())
            .map_err(|_| DomainError::InvalidEmail {
                reason: format!("email must be at most {} characters", EMAIL_MAX_LENGTH),
            })?;
        DisallowedCharsValidator::new("email", EMAIL_FORBIDDEN_CHARS)
            .validate(normalized.as_str())
            .map_err(|err| DomainError::InvalidEmail {
                reason: err.to_string(),
            })?;
        if !EMAIL_FORMAT.is_match(&normalized) {
            return Err(DomainError::InvalidEmail {
                reason: "email has an invalid format".to_string(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier constraints: 7-32 lowercase alphanumeric characters
fn validate_identifier(kind: &'static str, value: &str) -> DomainResult<()> {
    let length = value.chars().count();
    if !(7..=32).contains(&length) {
        return Err(DomainError::InvalidId {
            kind,
            reason: "identifier must be 7 to 32 characters long".to_string(),
        });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(DomainError::InvalidId {
            kind,
            reason: "identifier must contain only lowercase letters and digits".to_string(),
        });
    }
    Ok(())
}

fn generate_identifier() -> String {
    // UUIDv4 in simple form: 32 lowercase hex characters
    uuid::Uuid::new_v4().simple().to_string()
}

/// User identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Generate a new random user ID
    pub fn generate() -> Self {
        Self(generate_identifier())
    }

    /// Validate and wrap an existing identifier string
    pub fn parse(value: &str) -> DomainResult<Self> {
        validate_identifier("user", value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new random session ID
    pub fn generate() -> Self {
        Self(generate_identifier())
    }

    /// Validate and wrap an existing identifier string
    pub fn parse(value: &str) -> DomainResult<Self> {
        validate_identifier("session", value)?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
