//! Repository contracts for data persistence
//!
//! The domain layer defines only interfaces; implementations are
//! provided by infrastructure crates. Absence of an entity is reported
//! as `Ok(None)` or an empty collection, never as an error. Write
//! operations surface persistence faults as
//! [`DomainError::PersistenceFailed`](crate::errors::DomainError) and
//! never silently no-op.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::entities::{User, UserSession};
use crate::errors::DomainResult;
use crate::value_objects::{Email, SessionId, UserId};

/// Repository for user entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>>;

    /// Find a user by its unique email address
    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>>;

    /// Find all users
    async fn find_all(&self) -> DomainResult<Vec<User>>;

    /// Insert a new user
    async fn save(&self, user: &User) -> DomainResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> DomainResult<()>;

    /// Delete a user by ID
    async fn delete(&self, id: &UserId) -> DomainResult<()>;

    /// Check if a user exists
    async fn exists(&self, id: &UserId) -> DomainResult<bool>;
}

/// Repository for session entities
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Find a session by ID
    async fn find_by_id(&self, id: &SessionId) -> DomainResult<Option<UserSession>>;

    /// Find all sessions belonging to a user
    async fn find_by_user(&self, user_id: &UserId) -> DomainResult<Vec<UserSession>>;

    /// Insert a new session
    async fn save(&self, session: &UserSession) -> DomainResult<()>;

    /// Update an existing session
    async fn update(&self, session: &UserSession) -> DomainResult<()>;

    /// Delete a session by ID
    async fn delete(&self, id: &SessionId) -> DomainResult<()>;

    /// Delete every session belonging to a user
    async fn delete_by_user(&self, user_id: &UserId) -> DomainResult<()>;
}

/// Unit of work for transactional multi-write operations
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Begin a transaction
    async fn begin(&self) -> DomainResult<Box<dyn Transaction>>;
}

/// An open transaction
///
/// Boxed-future methods keep the trait object safe despite consuming
/// `self`. A use case spanning multiple writes must commit only after
/// all writes succeed and roll back on any failure path.
pub trait Transaction: Send + Sync {
    /// Commit the transaction
    fn commit(self: Box<Self>) -> Pin<Box<dyn Future<Output = DomainResult<()>> + Send>>;

    /// Roll the transaction back
    fn rollback(self: Box<Self>) -> Pin<Box<dyn Future<Output = DomainResult<()>> + Send>>;
}
