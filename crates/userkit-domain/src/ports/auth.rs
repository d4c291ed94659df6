//! Authenticated-session port
//!
//! The host web framework owns session transport; this port exposes the
//! user it resolved for the current request, or nothing.

use async_trait::async_trait;

use crate::errors::DomainResult;
use crate::value_objects::{Email, UserId};

/// The user attached to the current request's session
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub email: Email,
    pub name: String,
}

/// Provider of the current request's authenticated user
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// The authenticated user, or `None` when the request carries no
    /// valid session
    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>>;
}
