//! Note record.

use super::InvalidChoice;
use crate::id::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteCategory {
    /// Personal notes.
    Personal,
    /// Work notes.
    Work,
    /// Ideas.
    Ideas,
    /// To-do style notes.
    Todo,
    /// Anything else; legacy notes without a category land here.
    #[default]
    Other,
}

impl NoteCategory {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [Self::Personal, Self::Work, Self::Ideas, Self::Todo, Self::Other];

    /// Parse a category from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid category.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidChoice> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(Self::Personal),
            "work" => Ok(Self::Work),
            "ideas" => Ok(Self::Ideas),
            "todo" => Ok(Self::Todo),
            "other" => Ok(Self::Other),
            _ => Err(InvalidChoice::new("category", s, "personal, work, ideas, todo, other")),
        }
    }

    /// Raw enum string, also used as the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Work => "work",
            Self::Ideas => "ideas",
            Self::Todo => "todo",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for NoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A free-text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier.
    pub id: RecordId,
    /// Title (required on save).
    pub title: String,
    /// Body text, may be empty.
    #[serde(default)]
    pub content: String,
    /// Category.
    #[serde(default)]
    pub category: NoteCategory,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last edited.
    pub updated_at: DateTime<Utc>,
}

/// User-editable fields of a note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Category.
    pub category: NoteCategory,
}

impl NoteDraft {
    /// Build a draft from raw form input.
    pub fn new(title: impl Into<String>, content: impl Into<String>, category: NoteCategory) -> Self {
        Self { title: title.into(), content: content.into(), category }
    }
}

impl Note {
    /// Create a note from an already validated draft.
    pub fn from_draft(id: RecordId, draft: NoteDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
            category: draft.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields and bump `updated_at`.
    pub fn apply(&mut self, draft: NoteDraft, now: DateTime<Utc>) {
        self.title = draft.title;
        self.content = draft.content;
        self.category = draft.category;
        self.updated_at = now;
    }

    /// Whether the note was edited after creation.
    #[must_use]
    pub fn was_edited(&self) -> bool {
        self.updated_at != self.created_at
    }
}
