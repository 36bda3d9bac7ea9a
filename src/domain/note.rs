//! Notes, groups and attachments as the server returns them

use serde::{Deserialize, Serialize};

/// A note as held by the client for one fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    /// Rich-text markup (HTML)
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Note {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Note {
            id,
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            groups: Vec::new(),
            attachments: Vec::new(),
            updated_at: None,
        }
    }

    /// Builder-style helper for tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }

    /// Editable fields of this note, ready to be sent back
    pub fn to_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.clone(),
            groups: Some(self.group_names()),
        }
    }
}

/// Named label a note can belong to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// File attached to a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Attachment {
    pub fn kind(&self) -> AttachmentKind {
        AttachmentKind::classify(&self.mime_type, &self.filename)
    }
}

/// How an attachment can be previewed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Pdf,
    /// Audio or video
    Media,
    Other,
}

impl AttachmentKind {
    /// Classify by mime type first, then by file extension
    pub fn classify(mime_type: &str, filename: &str) -> Self {
        let mime = mime_type.to_ascii_lowercase();
        let ext = filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if mime.starts_with("image/")
            || matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
        {
            AttachmentKind::Image
        } else if mime.ends_with("pdf") || ext == "pdf" {
            AttachmentKind::Pdf
        } else if mime.starts_with("video/")
            || mime.starts_with("audio/")
            || matches!(ext.as_str(), "mp4" | "mov" | "webm" | "mp3" | "wav" | "ogg")
        {
            AttachmentKind::Media
        } else {
            AttachmentKind::Other
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttachmentKind::Image => "image",
            AttachmentKind::Pdf => "pdf",
            AttachmentKind::Media => "media",
            AttachmentKind::Other => "file",
        }
    }
}

/// Body of a create/update request.
///
/// `groups` are sent by name; `None` leaves the server's associations alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

impl NoteDraft {
    /// Fresh note as created from the "new note" action
    pub fn blank() -> Self {
        NoteDraft {
            title: "New note".to_string(),
            ..Default::default()
        }
    }

    /// Copy of an existing note, title suffixed
    pub fn duplicate_of(note: &Note) -> Self {
        let mut draft = note.to_draft();
        draft.title = format!("{} (copy)", note.title);
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_note() {
        let json = r#"{
            "id": 3,
            "title": "Groceries",
            "content": "<p>milk</p>",
            "tags": ["home", "shopping"],
            "groups": [{"id": 1, "name": "Personal"}],
            "attachments": [{"id": 9, "filename": "list.pdf", "mime_type": "application/pdf", "size": 1200}],
            "updated_at": "2025-01-17T10:00:00"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, 3);
        assert_eq!(note.tags, vec!["home", "shopping"]);
        assert_eq!(note.group_names(), vec!["Personal"]);
        assert_eq!(note.attachments[0].kind(), AttachmentKind::Pdf);
        assert_eq!(note.updated_at.as_deref(), Some("2025-01-17T10:00:00"));
    }

    #[test]
    fn test_deserialize_id_only() {
        let note: Note = serde_json::from_str(r#"{"id": 5}"#).unwrap();
        assert_eq!(note, Note::new(5, ""));
    }

    #[test]
    fn test_draft_omits_groups_when_unset() {
        let json = serde_json::to_value(NoteDraft::blank()).unwrap();
        assert_eq!(json["title"], "New note");
        assert!(json.get("groups").is_none());
    }

    #[test]
    fn test_duplicate_keeps_fields() {
        let mut note = Note::new(1, "Plan").with_tags(["work"]);
        note.content = "<p>x</p>".to_string();
        note.groups.push(Group {
            id: 2,
            name: "Projects".to_string(),
        });

        let draft = NoteDraft::duplicate_of(&note);
        assert_eq!(draft.title, "Plan (copy)");
        assert_eq!(draft.content, "<p>x</p>");
        assert_eq!(draft.tags, vec!["work"]);
        assert_eq!(draft.groups, Some(vec!["Projects".to_string()]));
    }

    #[test]
    fn test_attachment_kind_by_mime() {
        assert_eq!(AttachmentKind::classify("image/png", "x"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::classify("audio/mpeg", "x"), AttachmentKind::Media);
        assert_eq!(AttachmentKind::classify("video/mp4", "x"), AttachmentKind::Media);
        assert_eq!(
            AttachmentKind::classify("application/pdf", "x"),
            AttachmentKind::Pdf
        );
    }

    #[test]
    fn test_attachment_kind_by_extension() {
        assert_eq!(AttachmentKind::classify("", "photo.JPG"), AttachmentKind::Image);
        assert_eq!(AttachmentKind::classify("", "talk.webm"), AttachmentKind::Media);
        assert_eq!(AttachmentKind::classify("", "doc.pdf"), AttachmentKind::Pdf);
        assert_eq!(AttachmentKind::classify("", "archive.zip"), AttachmentKind::Other);
        assert_eq!(AttachmentKind::classify("", "README"), AttachmentKind::Other);
    }
}
