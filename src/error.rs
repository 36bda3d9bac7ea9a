//! Error types for notepin

use std::path::PathBuf;
use thiserror::Error;

/// Failure talking to the notes server
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, timeout, body read failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status; `body` is the response text
    #[error("Server returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Unexpected response from {url}: {detail}")]
    Decode { url: String, detail: String },
}

impl ApiError {
    /// HTTP status if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Main error type for notepin
#[derive(Debug, Error)]
pub enum NotepinError {
    #[error("Not a notepin workspace: {0}")]
    NotWorkspace(PathBuf),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Note not found: {0}")]
    NoteNotFound(i64),

    #[error("Group not found: {0}")]
    GroupNotFound(String),

    #[error("Attachment not found: {0}")]
    AttachmentNotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotepinError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotepinError::NotWorkspace(_) => 2,
            NotepinError::Api(_) => 3,
            NotepinError::NoteNotFound(_)
            | NotepinError::GroupNotFound(_)
            | NotepinError::AttachmentNotFound(_) => 4,
            NotepinError::InvalidInput(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotepinError::NotWorkspace(path) => {
                format!(
                    "Not a notepin workspace: {}\n\n\
                    Suggestions:\n\
                    • Run 'notepin init --server <url>' in this directory\n\
                    • Navigate to an existing notepin workspace\n\
                    • Set NOTEPIN_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            NotepinError::Api(ApiError::Transport { url, .. }) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check that the notes server is running and reachable at {}\n\
                    • Configure the server: notepin config server_url 'http://host:port'\n\
                    • Override for one call with NOTEPIN_SERVER",
                    self, url
                )
            }
            NotepinError::Api(ApiError::Status { status, .. }) if *status == 400 || *status == 403 => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Mutating requests need the anti-forgery token: notepin config csrf_token '<token>'\n\
                    • Refresh the session cookie: notepin config session_cookie 'session=...'",
                    self
                )
            }
            NotepinError::NoteNotFound(id) => {
                format!(
                    "Note not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'notepin list' to see note ids\n\
                    • The note may have been deleted on the server",
                    id
                )
            }
            NotepinError::GroupNotFound(group) => {
                format!(
                    "Group not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'notepin groups list' to see available groups\n\
                    • Create it: notepin groups add '{}'",
                    group, group
                )
            }
            NotepinError::InvalidInput(msg) => {
                if msg.contains("date") {
                    format!(
                        "Invalid input: {}\n\n\
                        Expected format: YYYY-MM-DD\n\
                        Example: notepin list --date 2025-01-17",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            NotepinError::TomlDeserialize(_) => {
                format!(
                    "Malformed .notepin/config.toml: {}\n\n\
                    Suggestions:\n\
                    • Fix the file by hand, or move it aside and run 'notepin init' again",
                    self
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotepinError
pub type Result<T> = std::result::Result<T, NotepinError>;
