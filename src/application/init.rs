//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, WorkspaceRepository};
use std::fs;
use std::path::Path;

/// Initialize a new workspace at `path` talking to `server_url`.
pub fn init(path: &Path, server_url: &str, csrf_token: Option<String>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let mut config = Config::new(server_url.trim_end_matches('/'));
    config.csrf_token = csrf_token;
    repo.save_config(&config)?;

    tracing::info!(root = %path.display(), server = %config.server_url, "workspace initialized");
    println!("Initialized notepin workspace at {}", path.display());
    println!("Server: {}", config.server_url);

    Ok(())
}
