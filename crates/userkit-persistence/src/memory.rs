//! In-memory repositories and unit of work

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use async_trait::async_trait;
use userkit_domain::entities::{User, UserSession};
use userkit_domain::errors::{DomainError, DomainResult};
use userkit_domain::repositories::{
    SessionRepository, Transaction, UnitOfWork, UserRepository,
};
use userkit_domain::value_objects::{Email, SessionId, UserId};

fn persistence_error(reason: impl Into<String>) -> DomainError {
    DomainError::PersistenceFailed {
        reason: reason.into(),
    }
}

/// In-memory user store keyed by ID with a unique-email constraint
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> DomainResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email() == email)
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|user| user.created_at());
        Ok(users)
    }

    async fn save(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(user.id().as_str()) {
            return Err(persistence_error(format!(
                "duplicate user id {}",
                user.id()
            )));
        }
        if users.values().any(|existing| existing.email() == user.email()) {
            return Err(persistence_error(format!(
                "unique constraint violated for email {}",
                user.email()
            )));
        }
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(user.id().as_str()) {
            return Err(persistence_error(format!("no user row for {}", user.id())));
        }
        users.insert(user.id().as_str().to_string(), user.clone());
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if users.remove(id.as_str()).is_none() {
            return Err(persistence_error(format!("no user row for {}", id)));
        }
        Ok(())
    }

    async fn exists(&self, id: &UserId) -> DomainResult<bool> {
        Ok(self.users.lock().unwrap().contains_key(id.as_str()))
    }
}

/// In-memory session store keyed by session ID
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<String, UserSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &SessionId) -> DomainResult<Option<UserSession>> {
        Ok(self.sessions.lock().unwrap().get(id.as_str()).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> DomainResult<Vec<UserSession>> {
        let mut sessions: Vec<UserSession> = self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|session| session.user_id() == user_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|session| session.created_at());
        Ok(sessions)
    }

    async fn save(&self, session: &UserSession) -> DomainResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.contains_key(session.id().as_str()) {
            return Err(persistence_error(format!(
                "duplicate session id {}",
                session.id()
            )));
        }
        sessions.insert(session.id().as_str().to_string(), session.clone());
        Ok(())
    }

    async fn update(&self, session: &UserSession) -> DomainResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        if !sessions.contains_key(session.id().as_str()) {
            return Err(persistence_error(format!(
                "no session row for {}",
                session.id()
            )));
        }
        sessions.insert(session.id().as_str().to_string(), session.clone());
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> DomainResult<()> {
        let mut sessions = self.sessions.lock().unwrap();
        if sessions.remove(id.as_str()).is_none() {
            return Err(persistence_error(format!("no session row for {}", id)));
        }
        Ok(())
    }

    async fn delete_by_user(&self, user_id: &UserId) -> DomainResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .retain(|_, session| session.user_id() != user_id);
        Ok(())
    }
}

/// Unit of work over the in-memory stores
///
/// The stores apply writes immediately, so commit and rollback are
/// bookkeeping only. The type exists so use cases exercise the same
/// transaction discipline a database-backed adapter requires.
pub struct InMemoryUnitOfWork;

impl InMemoryUnitOfWork {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InMemoryUnitOfWork {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    async fn begin(&self) -> DomainResult<Box<dyn Transaction>> {
        Ok(Box::new(InMemoryTransaction))
    }
}

struct InMemoryTransaction;

impl Transaction for InMemoryTransaction {
    fn commit(self: Box<Self>) -> Pin<Box<dyn Future<Output = DomainResult<()>> + Send>> {
        Box::pin(async { Ok(()) })
    }

    fn rollback(self: Box<Self>) -> Pin<Box<dyn Future<Output = DomainResult<()>> + Send>> {
        Box::pin(async { Ok(()) })
    }
}
