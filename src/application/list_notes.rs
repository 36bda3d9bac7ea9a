//! List notes use case

use crate::domain::{pipeline, Note, ViewState};
use crate::error::Result;
use crate::infrastructure::{ApiClient, ClientState, KeyValueStore};
use std::collections::BTreeSet;

/// Holds the rendered note list and rebuilds it from the server.
///
/// A failed fetch leaves the previous list in place; the most recent
/// successful reload always replaces it.
pub struct NoteListService<S> {
    pub(crate) api: ApiClient,
    pub(crate) state: ClientState<S>,
    rendered: Vec<Note>,
}

impl<S: KeyValueStore> NoteListService<S> {
    pub fn new(api: ApiClient, state: ClientState<S>) -> Self {
        NoteListService {
            api,
            state,
            rendered: Vec::new(),
        }
    }

    /// Fetch for `view`, run the pipeline and keep the result as rendered.
    ///
    /// On failure the error is logged and returned, and the rendered list
    /// is left untouched.
    pub async fn reload(&mut self, view: &ViewState) -> Result<&[Note]> {
        let fetched = match self.api.list_notes(&view.query()).await {
            Ok(notes) => notes,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load notes");
                return Err(e.into());
            }
        };

        let order = self.state.order();
        let pinned = self.state.pinned();
        let fetched_count = fetched.len();
        self.rendered = pipeline::arrange(fetched, &view.tags, view.tag_mode, &order, &pinned);

        tracing::debug!(
            fetched = fetched_count,
            rendered = self.rendered.len(),
            mode = %view.tag_mode,
            "notes rendered"
        );
        Ok(&self.rendered)
    }

    pub fn rendered(&self) -> &[Note] {
        &self.rendered
    }

    pub fn rendered_ids(&self) -> Vec<i64> {
        pipeline::ids_of(&self.rendered)
    }

    pub fn find(&self, id: i64) -> Option<&Note> {
        self.rendered.iter().find(|n| n.id == id)
    }

    pub fn pinned(&self) -> BTreeSet<i64> {
        self.state.pinned()
    }

    pub fn is_pinned(&self, id: i64) -> bool {
        self.state.pinned().contains(&id)
    }
}
