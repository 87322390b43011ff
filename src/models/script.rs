//! Saved script record.

use crate::id::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named script kept in the script library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedScript {
    /// Unique identifier.
    pub id: RecordId,
    /// Name (required).
    pub name: String,
    /// What the script does.
    #[serde(default)]
    pub description: String,
    /// Source text.
    #[serde(alias = "code")]
    pub source: String,
    /// When the script was saved first.
    pub created_at: DateTime<Utc>,
    /// When the script was last edited.
    pub updated_at: DateTime<Utc>,
}

/// Name shown for a scratch script that was never named.
pub const UNNAMED_SCRIPT: &str = "Unbenannt";

/// The script currently open in the editor, autosaved on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentScript {
    /// Editor name field, [`UNNAMED_SCRIPT`] when blank.
    pub name: String,
    /// Editor contents.
    #[serde(default)]
    pub code: String,
    /// Last autosave.
    pub timestamp: DateTime<Utc>,
}

impl CurrentScript {
    /// Snapshot the editor state.
    pub fn new(name: &str, code: impl Into<String>, now: DateTime<Utc>) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { UNNAMED_SCRIPT } else { name };
        Self { name: name.to_string(), code: code.into(), timestamp: now }
    }

    /// The name as the editor shows it: blank while unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name == UNNAMED_SCRIPT {
            ""
        } else {
            &self.name
        }
    }
}

/// User-editable fields of a saved script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptDraft {
    /// Name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Source text.
    pub source: String,
}

impl SavedScript {
    /// Create a script from an already validated draft.
    pub fn from_draft(id: RecordId, draft: ScriptDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            source: draft.source,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace all mutable fields and bump `updated_at`.
    pub fn apply(&mut self, draft: ScriptDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.source = draft.source;
        self.updated_at = now;
    }

    /// Number of source lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.source.split('\n').count()
    }
}
