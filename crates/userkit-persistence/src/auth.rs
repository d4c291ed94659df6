//! Auth provider stand-in
//!
//! The real provider is the host web framework's session layer. This
//! implementation lets the host (or a test) install the user resolved
//! for the current request.

use std::sync::RwLock;

use async_trait::async_trait;
use userkit_domain::errors::DomainResult;
use userkit_domain::ports::{AuthProvider, AuthenticatedUser};

/// Auth provider holding an explicitly installed user
pub struct StaticAuthProvider {
    current: RwLock<Option<AuthenticatedUser>>,
}

impl StaticAuthProvider {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Install the authenticated user for subsequent lookups
    pub fn set_user(&self, user: AuthenticatedUser) {
        *self.current.write().unwrap() = Some(user);
    }

    /// Clear the authenticated user
    pub fn clear(&self) {
        *self.current.write().unwrap() = None;
    }
}

impl Default for StaticAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_user(&self) -> DomainResult<Option<AuthenticatedUser>> {
        Ok(self.current.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use userkit_domain::value_objects::{Email, UserId};

    use super::*;

    #[tokio::test]
    async fn empty_provider_yields_none() {
        let provider = StaticAuthProvider::new();
        assert!(provider.current_user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn installed_user_roundtrips() {
        let provider = StaticAuthProvider::new();
        let user = AuthenticatedUser {
            id: UserId::generate(),
            email: Email::parse("a@example.com").unwrap(),
            name: "A".to_string(),
        };
        provider.set_user(user.clone());
        assert_eq!(provider.current_user().await.unwrap(), Some(user));

        provider.clear();
        assert!(provider.current_user().await.unwrap().is_none());
    }
}
