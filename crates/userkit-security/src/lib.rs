//! Security adapters for userkit
//!
//! Implements the domain's hashing and token-generation ports with
//! Argon2id password hashing and OS-random opaque tokens.

pub mod hash;
pub mod token;

pub use hash::Argon2HashService;
pub use token::RandomTokenSource;
