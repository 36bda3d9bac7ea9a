//! Application layer - Use cases and orchestration

pub mod attachments;
pub mod context;
pub mod edit_note;
pub mod groups;
pub mod init;
pub mod list_notes;
pub mod manage_config;
pub mod note_actions;
pub mod theme;

pub use attachments::AttachmentService;
pub use context::ClientContext;
pub use edit_note::NoteEditor;
pub use groups::GroupService;
pub use list_notes::NoteListService;
pub use manage_config::ConfigService;
pub use theme::ThemeService;
