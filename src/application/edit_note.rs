//! Edit session for a single note
//!
//! Field edits update a local draft and schedule a debounced save; only the
//! latest draft is sent once edits pause for the configured window. An
//! explicit [`NoteEditor::save_now`] bypasses the debounce.

use crate::domain::tags::split_list;
use crate::domain::{Note, NoteDraft};
use crate::error::{ApiError, Result};
use crate::infrastructure::{ApiClient, Debouncer};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct NoteEditor {
    note_id: i64,
    draft: NoteDraft,
    api: ApiClient,
    debouncer: Debouncer,
    /// Failure of the most recent background save, reported by `finish`
    last_error: Arc<Mutex<Option<ApiError>>>,
}

impl NoteEditor {
    pub fn new(api: ApiClient, note: &Note, window: Duration) -> Self {
        NoteEditor {
            note_id: note.id,
            draft: note.to_draft(),
            api,
            debouncer: Debouncer::new(window),
            last_error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn note_id(&self) -> i64 {
        self.note_id
    }

    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
        self.schedule_save();
    }

    pub fn set_content(&mut self, content: &str) {
        self.draft.content = content.to_string();
        self.schedule_save();
    }

    /// Comma-separated tag input, as typed
    pub fn set_tags(&mut self, input: &str) {
        self.draft.tags = split_list(input);
        self.schedule_save();
    }

    /// Comma-separated group names, as typed
    pub fn set_groups(&mut self, input: &str) {
        self.draft.groups = Some(split_list(input));
        self.schedule_save();
    }

    /// Send the current draft right away, dropping any pending save
    pub async fn save_now(&mut self) -> Result<()> {
        self.debouncer.cancel();
        self.api.update_note(self.note_id, &self.draft).await?;
        tracing::info!(id = self.note_id, "note saved");
        Ok(())
    }

    /// Send whatever is pending and report a failed background save
    pub async fn finish(mut self) -> Result<()> {
        self.debouncer.flush().await;
        let failure = self.last_error.lock().ok().and_then(|mut e| e.take());
        match failure {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn schedule_save(&mut self) {
        let api = self.api.clone();
        let id = self.note_id;
        let draft = self.draft.clone();
        let last_error = Arc::clone(&self.last_error);

        self.debouncer.schedule(async move {
            let outcome = api.update_note(id, &draft).await;
            if let Ok(mut slot) = last_error.lock() {
                match outcome {
                    Ok(()) => {
                        tracing::debug!(id, "debounced save sent");
                        *slot = None;
                    }
                    Err(e) => {
                        tracing::error!(id, error = %e, "debounced save failed");
                        *slot = Some(e);
                    }
                }
            }
        });
    }
}
