//! userkit domain layer
//!
//! Entities, value objects, domain errors, repository contracts, and
//! ports. This layer defines only interfaces for persistence and
//! infrastructure concerns; implementations live in the infrastructure
//! crates.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{User, UserSession};
pub use errors::{DomainError, DomainResult};
pub use value_objects::{Email, SessionId, UserId};
