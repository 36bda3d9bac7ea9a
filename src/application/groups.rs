//! Group management use case

use crate::domain::{Group, ViewState};
use crate::error::{NotepinError, Result};
use crate::infrastructure::ApiClient;

/// Service for listing and editing groups
pub struct GroupService {
    api: ApiClient,
}

impl GroupService {
    pub fn new(api: ApiClient) -> Self {
        GroupService { api }
    }

    pub async fn list(&self) -> Result<Vec<Group>> {
        Ok(self.api.list_groups().await?)
    }

    /// Look a group up by id or by exact name
    pub async fn resolve(&self, key: &str) -> Result<Group> {
        let groups = self.list().await?;
        let key = key.trim();
        let by_id = key.parse::<i64>().ok();

        groups
            .into_iter()
            .find(|g| Some(g.id) == by_id || g.name == key)
            .ok_or_else(|| NotepinError::GroupNotFound(key.to_string()))
    }

    pub async fn create(&self, name: &str) -> Result<Group> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NotepinError::InvalidInput(
                "group name must not be empty".to_string(),
            ));
        }
        let group = self.api.create_group(name).await?;
        tracing::info!(id = group.id, name = %group.name, "group created");
        Ok(group)
    }

    /// Rename `group`; `None` when the new name is blank or unchanged
    pub async fn rename(&self, group: &Group, new_name: &str) -> Result<Option<Group>> {
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == group.name {
            return Ok(None);
        }
        let renamed = self.api.rename_group(group.id, new_name).await?;
        tracing::info!(id = group.id, from = %group.name, to = %renamed.name, "group renamed");
        Ok(Some(renamed))
    }

    /// Delete the group; notes keep existing.
    ///
    /// Returns the view to render next: the group filter is dropped when it
    /// pointed at the deleted group.
    pub async fn delete(&self, group_id: i64, view: &ViewState) -> Result<ViewState> {
        self.api.delete_group(group_id).await?;
        tracing::info!(id = group_id, "group deleted");

        if view.group_id == Some(group_id) {
            Ok(view.without_group())
        } else {
            Ok(view.clone())
        }
    }
}
