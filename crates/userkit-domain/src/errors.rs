//! Domain errors for userkit
//!
//! Every error carries a human-readable message via `Display` and a
//! stable upper-snake code via [`DomainError::code`] for programmatic
//! branching. Callers branch on the code, never on the message.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid email address: {reason}")]
    InvalidEmail { reason: String },

    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    #[error("Invalid {kind} identifier: {reason}")]
    InvalidId { kind: &'static str, reason: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Password does not meet policy: {reason}")]
    WeakPassword { reason: String },

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Email address is already registered: {email}")]
    EmailAlreadyExists { email: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Persistence operation failed: {reason}")]
    PersistenceFailed { reason: String },

    #[error("Transaction failed: {reason}")]
    TransactionFailed { reason: String },

    #[error("Hashing operation failed: {reason}")]
    HashingFailed { reason: String },
}

impl DomainError {
    /// Stable machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidEmail { .. } => "INVALID_EMAIL",
            DomainError::InvalidName { .. } => "INVALID_NAME",
            DomainError::InvalidId { .. } => "INVALID_ID",
            DomainError::InvalidToken { .. } => "INVALID_TOKEN",
            DomainError::WeakPassword { .. } => "WEAK_PASSWORD",
            DomainError::UserNotFound { .. } => "USER_NOT_FOUND",
            DomainError::SessionNotFound { .. } => "SESSION_NOT_FOUND",
            DomainError::EmailAlreadyExists { .. } => "EMAIL_ALREADY_EXISTS",
            DomainError::AuthenticationFailed => "AUTHENTICATION_FAILED",
            DomainError::NotAuthenticated => "NOT_AUTHENTICATED",
            DomainError::TokenExpired => "TOKEN_EXPIRED",
            DomainError::PersistenceFailed { .. } => "PERSISTENCE_FAILED",
            DomainError::TransactionFailed { .. } => "TRANSACTION_FAILED",
            DomainError::HashingFailed { .. } => "HASHING_FAILED",
        }
    }

    /// Whether this error is an infrastructure fault whose detail must
    /// not reach external callers
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            DomainError::PersistenceFailed { .. }
                | DomainError::TransactionFailed { .. }
                | DomainError::HashingFailed { .. }
        )
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
