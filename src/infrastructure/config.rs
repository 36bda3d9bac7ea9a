//! Configuration management

use crate::error::{NotepinError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 600;
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server_url: String,
    /// Anti-forgery token sent as `X-CSRFToken` on mutating requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    /// Raw `Cookie` header value identifying the logged-in session
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    pub created: DateTime<Utc>,
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

impl Config {
    /// Create a new config pointing at `server_url`
    pub fn new(server_url: impl Into<String>) -> Self {
        Config {
            server_url: server_url.into(),
            csrf_token: None,
            session_cookie: None,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            created: Utc::now(),
        }
    }

    /// Load config from .notepin/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".notepin").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotepinError::NotWorkspace(path.to_path_buf())
            } else {
                NotepinError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .notepin/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let notepin_dir = path.join(".notepin");
        let config_path = notepin_dir.join("config.toml");

        if !notepin_dir.exists() {
            fs::create_dir(&notepin_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Server base URL, NOTEPIN_SERVER taking precedence
    pub fn get_server_url(&self) -> String {
        std::env::var("NOTEPIN_SERVER")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| self.server_url.clone())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
