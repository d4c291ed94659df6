//! Ports to infrastructure collaborators
//!
//! Interfaces for capabilities the domain needs but does not implement:
//! credential hashing, opaque token generation, and the host web
//! framework's authenticated session.

pub mod auth;
pub mod hash;
pub mod token;

pub use auth::{AuthProvider, AuthenticatedUser};
pub use hash::HashService;
pub use token::TokenSource;
