//! Statistics aggregators.
//!
//! Pure functions over the full, unfiltered collection. Field names
//! serialize camelCase so the blocks drop straight into export files.

use crate::models::{Note, Project, ProjectStatus, SavedScript, Task};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// Window for the "recent notes" count.
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Task summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// All records.
    pub total: usize,
    /// Not yet completed.
    pub pending: usize,
    /// Completed.
    pub completed: usize,
    /// Rounded percentage of completed tasks; 0 for an empty list.
    pub completion_rate: u32,
}

/// Note summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    /// All records.
    pub total: usize,
    /// Distinct categories actually in use.
    pub categories: usize,
    /// Created within the last seven days.
    pub recent: usize,
    /// Words across titles and contents.
    pub words: usize,
}

/// Project summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    /// All records.
    pub total: usize,
    /// In the active status.
    pub active: usize,
    /// Completed.
    pub completed: usize,
    /// Past their deadline and not finished.
    pub overdue: usize,
}

/// Script library summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScriptStats {
    /// All records.
    pub total: usize,
}

/// `round(part / total * 100)` with halves rounded up; 0 when `total` is 0.
#[must_use]
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Summarize a task list.
#[must_use]
pub fn task_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    TaskStats { total, pending: total - completed, completed, completion_rate: percentage(completed, total) }
}

/// Words in one note: title and content joined by a space, split on
/// whitespace runs. An empty note has zero words.
#[must_use]
pub fn note_word_count(note: &Note) -> usize {
    note.title.split_whitespace().count() + note.content.split_whitespace().count()
}

/// Summarize a note list relative to `now`.
#[must_use]
pub fn note_stats(notes: &[Note], now: DateTime<Utc>) -> NoteStats {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let categories: HashSet<_> = notes.iter().map(|n| n.category).collect();
    NoteStats {
        total: notes.len(),
        categories: categories.len(),
        recent: notes.iter().filter(|n| n.created_at > cutoff).count(),
        words: notes.iter().map(note_word_count).sum(),
    }
}

/// Summarize a project list; overdue is evaluated against `now`.
#[must_use]
pub fn project_stats(projects: &[Project], now: DateTime<Utc>) -> ProjectStats {
    let count = |status| projects.iter().filter(|p| p.status == status).count();
    ProjectStats {
        total: projects.len(),
        active: count(ProjectStatus::Active),
        completed: count(ProjectStatus::Completed),
        overdue: projects.iter().filter(|p| p.is_overdue(now)).count(),
    }
}

/// Summarize the script library.
#[must_use]
pub fn script_stats(scripts: &[SavedScript]) -> ScriptStats {
    ScriptStats { total: scripts.len() }
}
