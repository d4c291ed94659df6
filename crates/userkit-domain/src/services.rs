//! Domain services

use crate::errors::{DomainError, DomainResult};

/// Password acceptance rules
///
/// Checked before hashing on account creation and password reset.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    min_length: usize,
}

impl PasswordPolicy {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a candidate password against the policy
    pub fn check(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.min_length {
            return Err(DomainError::WeakPassword {
                reason: format!("password must be at least {} characters", self.min_length),
            });
        }
        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(DomainError::WeakPassword {
                reason: "password must contain a letter".to_string(),
            });
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::WeakPassword {
                reason: "password must contain a digit".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::new(8)
    }
}
