//! Everything a command needs to talk to the server for one workspace

use crate::error::Result;
use crate::infrastructure::{
    ApiClient, ClientState, Config, FileStore, FileSystemRepository, WorkspaceRepository,
};

pub struct ClientContext {
    pub config: Config,
    pub api: ApiClient,
    pub state: ClientState<FileStore>,
}

impl ClientContext {
    /// Load the workspace config and wire the API client and local state
    pub fn open(repo: &FileSystemRepository) -> Result<Self> {
        let config = repo.load_config()?;
        let api = ApiClient::new(&config.get_server_url())
            .with_csrf_token(config.csrf_token.clone())
            .with_session_cookie(config.session_cookie.clone());
        let state = ClientState::new(FileStore::new(repo.state_dir()));

        tracing::debug!(server = api.base_url(), root = %repo.root().display(), "workspace opened");

        Ok(ClientContext { config, api, state })
    }
}
