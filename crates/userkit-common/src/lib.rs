//! Shared utilities for userkit crates
//!
//! Hosts the structured logging system and the validation traits used by
//! the domain layer. Kept free of domain types so every layer can depend
//! on it without cycles.

pub mod logging;
pub mod validation;

pub use validation::{ValidationError, Validator};
