//! Configuration management for userkit
//!
//! Loads typed configuration from defaults, an optional TOML file, and
//! `USERKIT_*` environment overrides, in that order.

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{AppConfig, AuthConfig, LoggingConfig};
