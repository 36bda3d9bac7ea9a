//! Workspace discovery and layout
//!
//! A workspace is any directory holding a `.notepin/` folder:
//!
//! ```text
//! .notepin/
//!   config.toml        server connection settings
//!   state/<key>.json   client-local preferences (order, pins, theme)
//! ```

use crate::error::{NotepinError, Result};
use crate::infrastructure::Config;
use std::fs;
use std::path::{Path, PathBuf};

const WORKSPACE_DIR: &str = ".notepin";
const STATE_DIR: &str = "state";

/// Abstract repository for workspace-level operations
pub trait WorkspaceRepository {
    /// Get the root directory of this workspace
    fn root(&self) -> &Path;

    /// Load configuration from .notepin/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .notepin/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .notepin directory exists
    fn is_initialized(&self) -> bool;

    /// Create .notepin directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of WorkspaceRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover workspace root.
    /// First checks NOTEPIN_ROOT, then walks up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NOTEPIN_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_workspace_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(NotepinError::Config(format!(
                    "NOTEPIN_ROOT is set to '{}' but no .notepin directory found. \
                    Run 'notepin init' in that directory or unset NOTEPIN_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover workspace root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_workspace_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(NotepinError::NotWorkspace(start.to_path_buf())),
            }
        }
    }

    /// Directory holding client-local state files
    pub fn state_dir(&self) -> PathBuf {
        self.root.join(WORKSPACE_DIR).join(STATE_DIR)
    }

    fn has_workspace_dir(path: &Path) -> bool {
        path.join(WORKSPACE_DIR).is_dir()
    }
}

impl WorkspaceRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_workspace_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let workspace_dir = self.root.join(WORKSPACE_DIR);

        if workspace_dir.exists() {
            return Err(NotepinError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.state_dir())?;
        Ok(())
    }
}
