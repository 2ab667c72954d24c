//! Configuration loading from disk.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ProbeConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for the schema.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failed.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProbeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProbeConfig = toml::from_str(&content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Semantic validation (serde handles syntactic).
///
/// Returns all validation errors, not just the first.
pub fn validate_config(config: &ProbeConfig) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(format!(
            "listener.bind_address `{}` is not a valid socket address",
            config.listener.bind_address
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push("timeouts.request_secs must be greater than zero".to_string());
    }

    let cookie = &config.session.cookie_name;
    if cookie.is_empty() || cookie.contains('=') || cookie.contains(';') {
        errors.push(format!("session.cookie_name `{cookie}` is not a valid cookie name"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProbeConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let mut config = ProbeConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("bind_address"));
    }

    #[test]
    fn test_all_errors_reported() {
        let mut config = ProbeConfig::default();
        config.listener.bind_address = "nope".to_string();
        config.timeouts.request_secs = 0;
        config.session.cookie_name = String::new();
        match validate_config(&config) {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
}
