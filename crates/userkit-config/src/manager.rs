//! Configuration loading
//!
//! Precedence, lowest to highest: built-in defaults, TOML file,
//! `USERKIT_*` environment variables.

use std::path::Path;

use crate::error::{ConfigError, Result};
use crate::types::AppConfig;

/// Loads and validates the application configuration
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration with defaults, an optional file, and
    /// environment overrides
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)?;
                toml::from_str(&raw)?
            }
            _ => AppConfig::default(),
        };

        Self::apply_env_overrides(&mut config)?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(config: &mut AppConfig) -> Result<()> {
        if let Ok(value) = std::env::var("USERKIT_ACCESS_TOKEN_TTL_MINUTES") {
            config.auth.access_token_ttl_minutes = value.parse().map_err(|_| {
                ConfigError::invalid_value("auth.access_token_ttl_minutes", "not a number")
            })?;
        }
        if let Ok(value) = std::env::var("USERKIT_RESET_TOKEN_TTL_MINUTES") {
            config.auth.reset_token_ttl_minutes = value.parse().map_err(|_| {
                ConfigError::invalid_value("auth.reset_token_ttl_minutes", "not a number")
            })?;
        }
        if let Ok(value) = std::env::var("USERKIT_MIN_PASSWORD_LENGTH") {
            config.auth.min_password_length = value.parse().map_err(|_| {
                ConfigError::invalid_value("auth.min_password_length", "not a number")
            })?;
        }
        if let Ok(value) = std::env::var("USERKIT_LOG_LEVEL") {
            config.logging.level = value;
        }
        Ok(())
    }

    fn validate(config: &AppConfig) -> Result<()> {
        if config.auth.access_token_ttl_minutes == 0 {
            return Err(ConfigError::invalid_value(
                "auth.access_token_ttl_minutes",
                "must be greater than zero",
            ));
        }
        if config.auth.reset_token_ttl_minutes == 0 {
            return Err(ConfigError::invalid_value(
                "auth.reset_token_ttl_minutes",
                "must be greater than zero",
            ));
        }
        if config.auth.min_password_length < 4 {
            return Err(ConfigError::invalid_value(
                "auth.min_password_length",
                "must be at least 4",
            ));
        }
        match config.logging.level.to_lowercase().as_str() {
            "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::invalid_value(
                    "logging.level",
                    format!("unknown level {:?}", other),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_without_file_uses_defaults() {
        let config = ConfigManager::load(None).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\naccess_token_ttl_minutes = 5").unwrap();

        let config = ConfigManager::load(Some(file.path())).unwrap();
        assert_eq!(config.auth.access_token_ttl_minutes, 5);
        assert_eq!(config.auth.min_password_length, 8);
    }

    #[test]
    fn rejects_zero_ttl() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[auth]\naccess_token_ttl_minutes = 0").unwrap();

        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"loud\"").unwrap();

        let result = ConfigManager::load(Some(file.path()));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
