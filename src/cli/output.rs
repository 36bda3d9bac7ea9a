//! Output formatting utilities
//!
//! Rendering is a pure function of the pipeline's output and the pin set.

use crate::domain::tags::join_list;
use crate::domain::{Group, Note};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

const TITLE_WIDTH: usize = 32;

fn markup_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn block_end_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?i)</(p|div|h[1-6]|li|blockquote|pre)>|<br\s*/?>").unwrap())
}

/// Rich-text markup reduced to plain text, one line per block
pub fn plain_text(markup: &str) -> String {
    let with_breaks = block_end_regex().replace_all(markup, "\n");
    let stripped = markup_regex().replace_all(&with_breaks, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Format the rendered note list, one line per note
pub fn format_note_list(notes: &[Note], pinned: &BTreeSet<i64>) -> String {
    if notes.is_empty() {
        return "No notes found".to_string();
    }

    let mut output = String::new();
    for note in notes {
        let marker = if pinned.contains(&note.id) { "*" } else { " " };
        let title = if note.title.is_empty() {
            "(untitled)".to_string()
        } else {
            truncate(&note.title, TITLE_WIDTH)
        };

        output.push_str(&format!(
            "{} {:>5}  {:<width$}",
            marker,
            note.id,
            title,
            width = TITLE_WIDTH
        ));
        if !note.tags.is_empty() {
            output.push_str(&format!("  [{}]", join_list(&note.tags)));
        }
        if !note.groups.is_empty() {
            output.push_str(&format!("  ({})", join_list(&note.group_names())));
        }
        if !note.attachments.is_empty() {
            output.push_str(&format!("  +{} file(s)", note.attachments.len()));
        }
        output.push('\n');
    }
    output
}

/// Full view of one note
pub fn format_note_detail(note: &Note, pinned: bool) -> String {
    let mut output = format!("#{} {}", note.id, note.title);
    if pinned {
        output.push_str("  [pinned]");
    }
    output.push('\n');

    if let Some(updated) = &note.updated_at {
        output.push_str(&format!("Updated: {}\n", updated));
    }
    if !note.tags.is_empty() {
        output.push_str(&format!("Tags: {}\n", join_list(&note.tags)));
    }
    if !note.groups.is_empty() {
        output.push_str(&format!("Groups: {}\n", join_list(&note.group_names())));
    }

    let body = plain_text(&note.content);
    if !body.is_empty() {
        output.push('\n');
        output.push_str(&body);
        output.push('\n');
    }

    if !note.attachments.is_empty() {
        output.push_str("\nAttachments:\n");
        for att in &note.attachments {
            output.push_str(&format!(
                "  {:>5}  {}  ({})\n",
                att.id,
                att.filename,
                att.kind().label()
            ));
        }
    }
    output
}

/// Format a list of groups for display
pub fn format_group_list(groups: &[Group], active: Option<i64>) -> String {
    if groups.is_empty() {
        return "No groups found".to_string();
    }

    let mut output = String::new();
    for group in groups {
        let marker = if Some(group.id) == active { ">" } else { " " };
        output.push_str(&format!("{} {:>5}  {}\n", marker, group.id, group.name));
    }
    output
}
