//! Per-note actions: create, duplicate, delete, pin, drag-and-drop
//!
//! Every server mutation reloads the list once the server has confirmed it;
//! nothing is applied optimistically.

use crate::application::NoteListService;
use crate::domain::{pipeline, Note, NoteDraft, ViewState};
use crate::error::{NotepinError, Result};
use crate::infrastructure::KeyValueStore;

impl<S: KeyValueStore> NoteListService<S> {
    /// Create a blank note and reload
    pub async fn create_note(&mut self, view: &ViewState) -> Result<Note> {
        let created = self.api.create_note(&NoteDraft::blank()).await?;
        tracing::info!(id = created.id, "note created");
        self.reload(view).await?;
        Ok(created)
    }

    /// Copy a rendered note (title suffixed with "(copy)") and reload
    pub async fn duplicate_note(&mut self, view: &ViewState, id: i64) -> Result<Note> {
        let source = self.find(id).ok_or(NotepinError::NoteNotFound(id))?;
        let draft = NoteDraft::duplicate_of(source);
        let created = self.api.create_note(&draft).await?;
        tracing::info!(source = id, id = created.id, "note duplicated");
        self.reload(view).await?;
        Ok(created)
    }

    /// Delete on the server and reload. The id stays in the local order
    /// and pin set; the pipeline ignores it from now on.
    pub async fn delete_note(&mut self, view: &ViewState, id: i64) -> Result<()> {
        self.api.delete_note(id).await?;
        tracing::info!(id, "note deleted");
        self.reload(view).await?;
        Ok(())
    }

    /// Drop `dragged` onto `target`'s slot in the rendered list.
    ///
    /// Returns false (and persists nothing) when the move is a no-op.
    pub async fn move_note(&mut self, view: &ViewState, dragged: i64, target: i64) -> Result<bool> {
        let Some(order) = pipeline::reorder(&self.rendered_ids(), dragged, target) else {
            tracing::debug!(dragged, target, "reorder ignored");
            return Ok(false);
        };

        self.state.set_order(&order);
        tracing::info!(dragged, target, "note moved");
        self.reload(view).await?;
        Ok(true)
    }

    /// Flip the pin on `id`, persist, reload. Returns whether it is now pinned.
    pub async fn toggle_pin(&mut self, view: &ViewState, id: i64) -> Result<bool> {
        let mut pinned = self.state.pinned();
        let now_pinned = pipeline::toggle_pin(&mut pinned, id);
        self.state.set_pinned(&pinned);
        tracing::info!(id, pinned = now_pinned, "pin toggled");
        self.reload(view).await?;
        Ok(now_pinned)
    }
}

#[cfg(test)]
mod tests {
    use crate::application::NoteListService;
    use crate::domain::ViewState;
    use crate::error::NotepinError;
    use crate::infrastructure::{ApiClient, ClientState, MemoryStore};
    use mockito::{Matcher, ServerGuard};
    use std::collections::BTreeSet;

    const FOUR_NOTES: &str = r#"[
        {"id": 1, "title": "A", "content": "<p>a</p>", "tags": ["x"], "groups": [{"id": 8, "name": "Work"}]},
        {"id": 2, "title": "B"},
        {"id": 3, "title": "C"},
        {"id": 4, "title": "D"}
    ]"#;

    async fn server_with_notes() -> ServerGuard {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/notes")
            .with_status(200)
            .with_body(FOUR_NOTES)
            .create_async()
            .await;
        server
    }

    async fn loaded(server: &ServerGuard) -> NoteListService<MemoryStore> {
        let mut list = NoteListService::new(
            ApiClient::new(&server.url()),
            ClientState::new(MemoryStore::new()),
        );
        list.reload(&ViewState::new()).await.unwrap();
        list
    }

    #[tokio::test]
    async fn test_move_persists_full_sequence() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;

        assert!(list.move_note(&ViewState::new(), 4, 2).await.unwrap());
        assert_eq!(list.state.order(), vec![1, 4, 2, 3]);
        assert_eq!(list.rendered_ids(), vec![1, 4, 2, 3]);
    }

    #[tokio::test]
    async fn test_move_onto_self_leaves_order_unchanged() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;
        list.state.set_order(&[3, 1]);

        assert!(!list.move_note(&ViewState::new(), 2, 2).await.unwrap());
        assert_eq!(list.state.order(), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_move_of_unrendered_note_is_noop() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;

        assert!(!list.move_note(&ViewState::new(), 42, 1).await.unwrap());
        assert!(list.state.order().is_empty());
    }

    #[tokio::test]
    async fn test_pinned_note_stays_first_after_move() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;

        assert!(list.toggle_pin(&ViewState::new(), 3).await.unwrap());
        assert_eq!(list.rendered_ids(), vec![3, 1, 2, 4]);

        // drag D onto A: manual order changes but C keeps the top slot
        list.move_note(&ViewState::new(), 4, 1).await.unwrap();
        assert_eq!(list.state.order(), vec![3, 4, 1, 2]);
        assert_eq!(list.rendered_ids(), vec![3, 4, 1, 2]);
    }

    #[tokio::test]
    async fn test_toggle_pin_twice_restores() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;
        list.state.set_pinned(&BTreeSet::from([3, 7]));

        assert!(!list.toggle_pin(&ViewState::new(), 3).await.unwrap());
        assert_eq!(list.state.pinned(), BTreeSet::from([7]));
        assert!(list.toggle_pin(&ViewState::new(), 3).await.unwrap());
        assert_eq!(list.state.pinned(), BTreeSet::from([3, 7]));
    }

    #[tokio::test]
    async fn test_duplicate_sends_copy() {
        let mut server = server_with_notes().await;
        let create = server
            .mock("POST", "/api/notes")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "A (copy)",
                "content": "<p>a</p>",
                "tags": ["x"],
                "groups": ["Work"],
            })))
            .with_status(201)
            .with_body(r#"{"id": 5}"#)
            .create_async()
            .await;

        let mut list = loaded(&server).await;
        let created = list.duplicate_note(&ViewState::new(), 1).await.unwrap();

        create.assert_async().await;
        assert_eq!(created.id, 5);
    }

    #[tokio::test]
    async fn test_duplicate_unknown_note() {
        let server = server_with_notes().await;
        let mut list = loaded(&server).await;

        let err = list.duplicate_note(&ViewState::new(), 99).await.unwrap_err();
        assert!(matches!(err, NotepinError::NoteNotFound(99)));
    }

    #[tokio::test]
    async fn test_create_blank_note() {
        let mut server = server_with_notes().await;
        let create = server
            .mock("POST", "/api/notes")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "New note",
                "content": "",
                "tags": [],
            })))
            .with_status(201)
            .with_body(r#"{"id": 6}"#)
            .create_async()
            .await;

        let mut list = loaded(&server).await;
        assert_eq!(list.create_note(&ViewState::new()).await.unwrap().id, 6);
        create.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_delete_surfaces_error() {
        let mut server = server_with_notes().await;
        server
            .mock("DELETE", "/api/notes/2")
            .with_status(500)
            .with_body("db locked")
            .create_async()
            .await;

        let mut list = loaded(&server).await;
        let err = list.delete_note(&ViewState::new(), 2).await.unwrap_err();

        assert!(matches!(err, NotepinError::Api(_)));
        assert_eq!(list.rendered_ids(), vec![1, 2, 3, 4]);
    }
}
