//! Domain layer - Business logic and domain models

pub mod note;
pub mod pipeline;
pub mod tags;
pub mod theme;
pub mod view;

pub use note::{Attachment, AttachmentKind, Group, Note, NoteDraft};
pub use tags::{TagFilter, TagMode};
pub use theme::Theme;
pub use view::{NoteQuery, ViewState};
