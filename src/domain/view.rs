//! View state threaded through a list render

use crate::domain::tags::{TagFilter, TagMode};
use crate::error::{NotepinError, Result};
use chrono::NaiveDate;

/// Everything that selects and filters the rendered list.
///
/// Search text, group and date are forwarded to the server; tags and mode
/// are applied client-side by the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub group_id: Option<i64>,
    pub tag_mode: TagMode,
    pub tags: TagFilter,
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group_id: Option<i64>) -> Self {
        self.group_id = group_id;
        self
    }

    pub fn with_tags(mut self, tags: TagFilter, mode: TagMode) -> Self {
        self.tags = tags;
        self.tag_mode = mode;
        self
    }

    /// Blank search text is treated as no search
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Same view without the group filter (after the group went away)
    pub fn without_group(&self) -> Self {
        ViewState {
            group_id: None,
            ..self.clone()
        }
    }

    /// Server-side part of this view
    pub fn query(&self) -> NoteQuery {
        NoteQuery {
            search: self.search.clone(),
            group_id: self.group_id,
            date: self.date,
        }
    }
}

/// Filters forwarded to `GET /api/notes`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub search: Option<String>,
    pub group_id: Option<i64>,
    pub date: Option<NaiveDate>,
}

impl NoteQuery {
    /// Query-string pairs; unset filters are left out
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = self.search.as_deref().filter(|q| !q.is_empty()) {
            pairs.push(("q", q.to_string()));
        }
        if let Some(group_id) = self.group_id {
            pairs.push(("group_id", group_id.to_string()));
        }
        if let Some(date) = self.date {
            pairs.push(("date", date.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}

/// Parse the date filter (YYYY-MM-DD)
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| NotepinError::InvalidInput(format!("bad date: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_is_empty() {
        assert!(ViewState::new().query().to_pairs().is_empty());
    }

    #[test]
    fn test_query_pairs() {
        let view = ViewState::new()
            .with_search(Some("milk".to_string()))
            .with_group(Some(4))
            .with_date(Some(NaiveDate::from_ymd_opt(2025, 1, 7).unwrap()));

        assert_eq!(
            view.query().to_pairs(),
            vec![
                ("q", "milk".to_string()),
                ("group_id", "4".to_string()),
                ("date", "2025-01-07".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_is_dropped() {
        let view = ViewState::new().with_search(Some("   ".to_string()));
        assert_eq!(view.search, None);
    }

    #[test]
    fn test_without_group_keeps_other_filters() {
        let view = ViewState::new()
            .with_group(Some(2))
            .with_tags(TagFilter::parse("a"), TagMode::And);
        let reset = view.without_group();
        assert_eq!(reset.group_id, None);
        assert_eq!(reset.tag_mode, TagMode::And);
        assert_eq!(reset.tags, TagFilter::parse("a"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-01-17").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
        );
        assert!(matches!(
            parse_date("17-01-2025"),
            Err(NotepinError::InvalidInput(_))
        ));
    }
}
