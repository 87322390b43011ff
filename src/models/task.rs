//! Task record.

use super::Priority;
use crate::id::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier.
    pub id: RecordId,
    /// What needs doing.
    pub text: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Priority; records written before priorities existed default to medium.
    #[serde(default)]
    pub priority: Priority,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was completed; `None` while pending.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task.
    pub fn new(id: RecordId, text: impl Into<String>, priority: Priority, now: DateTime<Utc>) -> Self {
        Self { id, text: text.into(), completed: false, priority, created_at: now, completed_at: None }
    }

    /// Whether the task is still open.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        !self.completed
    }

    /// Set the completion flag, keeping `completed_at` in step with it.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        self.completed = completed;
        self.completed_at = if completed { Some(now) } else { None };
    }
}
