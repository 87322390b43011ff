//! Filter → search → sort pipeline and statistics for the list views.
//!
//! Everything here is a pure function of its explicit inputs. Time-dependent
//! results (overdue, recent) take `now` as a parameter and are
//! recomputed on every call rather than cached.

pub mod filter;
pub mod search;
pub mod sort;
pub mod stats;

pub use filter::{NoteSelector, ProjectSelector, TaskSelector};
pub use search::SearchQuery;
pub use sort::{NoteSort, ProjectSort, ScriptSort, TaskSort};
pub use stats::{NoteStats, ProjectStats, ScriptStats, TaskStats};

use crate::models::{Note, Project, SavedScript, Task};
use chrono::{DateTime, Utc};

/// Everything that shapes the note list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Category filter.
    pub selector: NoteSelector,
    /// Free-text search.
    pub search: SearchQuery,
    /// Sort key.
    pub sort: NoteSort,
}

impl NoteQuery {
    /// Build a query from raw selector, search and sort strings.
    #[must_use]
    pub fn parse(selector: &str, search: &str, sort: &str) -> Self {
        Self { selector: NoteSelector::parse(selector), search: SearchQuery::new(search), sort: NoteSort::parse(sort) }
    }
}

/// Visible tasks for a selector and sort key.
pub fn task_view(tasks: &[Task], selector: TaskSelector, sort: TaskSort) -> Vec<&Task> {
    sort::sort_tasks(&filter::filter_tasks(tasks, selector), sort)
}

/// Visible notes: category filter AND search, then sort.
pub fn note_view<'a>(notes: &'a [Note], query: &NoteQuery) -> Vec<&'a Note> {
    let filtered = search::search_notes(filter::filter_notes(notes, query.selector), &query.search);
    sort::sort_notes(&filtered, query.sort)
}

/// Visible projects for a selector and sort key at `now`.
pub fn project_view(projects: &[Project], selector: ProjectSelector, sort: ProjectSort, now: DateTime<Utc>) -> Vec<&Project> {
    sort::sort_projects(&filter::filter_projects(projects, selector, now), sort)
}

/// Visible saved scripts.
pub fn script_view(scripts: &[SavedScript], sort: ScriptSort) -> Vec<&SavedScript> {
    let all: Vec<&SavedScript> = scripts.iter().collect();
    sort::sort_scripts(&all, sort)
}
