//! Note search.

use crate::models::Note;

/// A normalized (trimmed, lower-cased) search query.
///
/// An empty query applies no search filter, which is different from a
/// query that matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Normalize raw user input.
    pub fn new(raw: &str) -> Self {
        Self { needle: raw.trim().to_lowercase() }
    }

    /// Whether the query filters nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalized query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Case-insensitive substring match on title or content.
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        self.is_empty()
            || note.title.to_lowercase().contains(&self.needle)
            || note.content.to_lowercase().contains(&self.needle)
    }
}

/// Apply `query` to an already filtered list.
pub fn search_notes<'a>(notes: Vec<&'a Note>, query: &SearchQuery) -> Vec<&'a Note> {
    if query.is_empty() {
        return notes;
    }
    notes.into_iter().filter(|n| query.matches(n)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteCategory, NoteDraft};
    use crate::query::filter::{filter_notes, NoteSelector};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn notes() -> Vec<Note> {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        [
            ("Meeting", "Quarterly PLANNING", NoteCategory::Work),
            ("Groceries", "milk, bread", NoteCategory::Personal),
            ("Planning poker", "", NoteCategory::Ideas),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (title, content, category))| {
            Note::from_draft(Uuid::from_u128(i as u128), NoteDraft::new(title, content, category), now)
        })
        .collect()
    }

    #[test]
    fn test_query_is_normalized() {
        let query = SearchQuery::new("  PlanNing ");
        assert_eq!(query.as_str(), "planning");
        assert!(!query.is_empty());
        assert!(SearchQuery::new("   ").is_empty());
    }

    #[test]
    fn test_matches_title_or_content() {
        let notes = notes();
        let found = search_notes(notes.iter().collect(), &SearchQuery::new("planning"));
        let titles: Vec<&str> = found.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Meeting", "Planning poker"]);
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let notes = notes();
        assert_eq!(search_notes(notes.iter().collect(), &SearchQuery::new("")).len(), 3);
    }

    #[test]
    fn test_no_match_is_empty_result() {
        let notes = notes();
        assert!(search_notes(notes.iter().collect(), &SearchQuery::new("zebra")).is_empty());
    }

    #[test]
    fn test_search_is_anded_with_category() {
        let notes = notes();
        let work = filter_notes(&notes, NoteSelector::parse("ideas"));
        let found = search_notes(work, &SearchQuery::new("planning"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Planning poker");
    }
}
