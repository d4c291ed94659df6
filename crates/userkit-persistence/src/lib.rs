//! Persistence adapters for userkit
//!
//! In-memory implementations of the domain repository contracts, the
//! unit of work, and a session-backed auth provider stand-in. They
//! carry the same semantics a database-backed adapter would: inserts
//! reject duplicate keys and unique-email violations, updates and
//! deletes fail on missing rows instead of silently no-opping.

pub mod auth;
pub mod memory;

pub use auth::StaticAuthProvider;
pub use memory::{InMemorySessionRepository, InMemoryUnitOfWork, InMemoryUserRepository};
