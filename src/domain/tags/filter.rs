//! Tag filter parsing and evaluation
//!
//! A filter is a comma-separated list of tags combined with a single mode:
//! `OR` passes notes carrying any of the tags, `AND` passes notes carrying
//! all of them. Matching is exact and case-sensitive.
//!
//! # Examples
//!
//! ```
//! use notepin::domain::tags::{TagFilter, TagMode};
//!
//! let filter = TagFilter::parse("work, urgent");
//! assert!(filter.matches(&["work".to_string()], TagMode::Or));
//! assert!(!filter.matches(&["work".to_string()], TagMode::And));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How multiple filter tags combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TagMode {
    /// Note needs at least one of the tags
    #[default]
    Or,
    /// Note needs every tag
    And,
}

impl TagMode {
    /// The other mode (the mode button in the list header)
    pub fn toggled(self) -> Self {
        match self {
            TagMode::Or => TagMode::And,
            TagMode::And => TagMode::Or,
        }
    }
}

impl FromStr for TagMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "OR" | "ANY" => Ok(TagMode::Or),
            "AND" | "ALL" => Ok(TagMode::And),
            _ => Err(format!("Invalid tag mode: {}. Valid modes: or, and", s)),
        }
    }
}

impl fmt::Display for TagMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagMode::Or => write!(f, "OR"),
            TagMode::And => write!(f, "AND"),
        }
    }
}

/// Ordered list of tags a note is filtered by
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    tags: Vec<String>,
}

impl TagFilter {
    /// Parse a user-entered comma-separated list, dropping blank entries
    pub fn parse(input: &str) -> Self {
        TagFilter {
            tags: split_list(input),
        }
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagFilter {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Whether a note carrying `note_tags` passes this filter under `mode`
    pub fn matches(&self, note_tags: &[String], mode: TagMode) -> bool {
        if self.tags.is_empty() {
            return true;
        }

        let set: HashSet<&str> = note_tags.iter().map(|s| s.as_str()).collect();
        match mode {
            TagMode::And => self.tags.iter().all(|t| set.contains(t.as_str())),
            TagMode::Or => self.tags.iter().any(|t| set.contains(t.as_str())),
        }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join_list(&self.tags))
    }
}

/// Split on commas, trim, drop empty entries
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`split_list`] for display
pub fn join_list(items: &[String]) -> String {
    items.join(", ")
}
