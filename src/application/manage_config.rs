//! Config management use case

use crate::error::{NotepinError, Result};
use crate::infrastructure::{Config, FileSystemRepository, WorkspaceRepository};

pub const VALID_KEYS: &str = "server_url, csrf_token, session_cookie, debounce_ms, created";

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "server_url" => Ok(config.server_url.clone()),
            "csrf_token" => Ok(config.csrf_token.clone().unwrap_or_default()),
            "session_cookie" => Ok(config.session_cookie.clone().unwrap_or_default()),
            "debounce_ms" => Ok(config.debounce_ms.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(NotepinError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value; an empty value clears optional keys
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;
        let optional = |v: &str| Some(v.trim().to_string()).filter(|v| !v.is_empty());

        match key {
            "server_url" => {
                let url = value.trim().trim_end_matches('/');
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(NotepinError::Config(format!(
                        "Invalid server_url: '{}'. Expected http:// or https://",
                        value
                    )));
                }
                config.server_url = url.to_string();
            }
            "csrf_token" => config.csrf_token = optional(value),
            "session_cookie" => config.session_cookie = optional(value),
            "debounce_ms" => {
                config.debounce_ms = value.trim().parse().map_err(|_| {
                    NotepinError::Config(format!("Invalid debounce_ms: '{}'", value))
                })?;
            }
            "created" => {
                return Err(NotepinError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(NotepinError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
