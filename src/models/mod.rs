//! Record types for the four collections plus settings and profile.
//!
//! Each domain has one typed record. JSON field names are camelCase to match
//! the stored blobs and export files.

mod note;
mod profile;
mod project;
mod script;
mod settings;
mod task;

pub use note::{Note, NoteCategory, NoteDraft};
pub use profile::{PersonalInfo, ProfileDraft};
pub use project::{Project, ProjectDraft, ProjectStatus};
pub use script::{CurrentScript, SavedScript, ScriptDraft, UNNAMED_SCRIPT};
pub use settings::{FontSize, Settings, Theme};
pub use task::Task;

use serde::{Deserialize, Serialize};

/// Priority shared by tasks and projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority (default).
    #[default]
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse a priority from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid priority.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidChoice> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidChoice::new("priority", s, "low, medium, high")),
        }
    }

    /// Get the string representation of the priority.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Sort rank: high=3, medium=2, low=1.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when a string is not one of an enum's allowed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice {
    /// What was being parsed (e.g. "priority").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// Comma-separated list of accepted values.
    pub expected: &'static str,
}

impl InvalidChoice {
    pub(crate) fn new(kind: &'static str, value: &str, expected: &'static str) -> Self {
        Self { kind, value: value.to_string(), expected }
    }
}

impl std::fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: '{}' (must be one of: {})", self.kind, self.value, self.expected)
    }
}

impl std::error::Error for InvalidChoice {}

impl From<InvalidChoice> for crate::error::Error {
    fn from(value: InvalidChoice) -> Self {
        Self::Validation(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("HIGH").unwrap(), Priority::High);
        assert_eq!(Priority::from_str(" low ").unwrap(), Priority::Low);
        let err = Priority::from_str("urgent").unwrap_err();
        assert_eq!(err.to_string(), "invalid priority: 'urgent' (must be one of: low, medium, high)");
    }

    #[test]
    fn test_priority_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
        let parsed: Priority = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, Priority::High);
    }

    #[test]
    fn test_invalid_choice_becomes_validation_error() {
        let err: crate::error::Error = InvalidChoice::new("theme", "blue", "light, dark").into();
        assert!(err.is_validation());
    }
}
