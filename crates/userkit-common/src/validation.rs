//! Validation traits and common validators
//!
//! A small validator vocabulary shared by the domain layer so field
//! checks read the same everywhere.

use thiserror::Error;

/// Validation error with field context
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Required field missing: {field}")]
    Required { field: String },

    #[error("Value too long for {field}: at most {max} characters allowed")]
    TooLong { field: String, max: usize },

    #[error("Format error for {field}: {message}")]
    Format { field: String, message: String },
}

/// Trait for validators that can check values
pub trait Validator<T: ?Sized> {
    fn validate(&self, value: &T) -> Result<(), ValidationError>;
}

/// Rejects empty or whitespace-only strings
pub struct NonEmptyStringValidator {
    field_name: String,
}

impl NonEmptyStringValidator {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
        }
    }
}

impl Validator<str> for NonEmptyStringValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: self.field_name.clone(),
            });
        }
        Ok(())
    }
}

/// Rejects strings longer than a maximum number of characters
pub struct MaxLengthValidator {
    field_name: String,
    max: usize,
}

impl MaxLengthValidator {
    pub fn new(field_name: impl Into<String>, max: usize) -> Self {
        Self {
            field_name: field_name.into(),
            max,
        }
    }
}

impl Validator<str> for MaxLengthValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if value.chars().count() > self.max {
            return Err(ValidationError::TooLong {
                field: self.field_name.clone(),
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Rejects strings containing any of a set of forbidden characters
pub struct DisallowedCharsValidator {
    field_name: String,
    forbidden: &'static [char],
}

impl DisallowedCharsValidator {
    pub fn new(field_name: impl Into<String>, forbidden: &'static [char]) -> Self {
        Self {
            field_name: field_name.into(),
            forbidden,
        }
    }
}

impl Validator<str> for DisallowedCharsValidator {
    fn validate(&self, value: &str) -> Result<(), ValidationError> {
        if let Some(bad) = value
            .chars()
            .find(|c| c.is_whitespace() || self.forbidden.contains(c))
        {
            return Err(ValidationError::Format {
                field: self.field_name.clone(),
                message: format!("character {:?} is not allowed", bad),
            });
        }
        Ok(())
    }
}
