//! Core configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Authentication and token settings
    pub auth: AuthConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of access tokens in minutes
    pub access_token_ttl_minutes: u32,
    /// Lifetime of password reset tokens in minutes
    pub reset_token_ttl_minutes: u32,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_token_ttl_minutes: 60,
            reset_token_ttl_minutes: 30,
            min_password_length: 8,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum log level (debug, info, warn, error)
    pub level: String,
    /// Print to stderr instead of a log file
    pub print: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            print: true,
        }
    }
}
