//! Filter engine: selector → matching subset, original relative order kept.
//!
//! Unknown selector strings parse to `All`; a bad selector never fails.

use crate::models::{Note, NoteCategory, Priority, Project, ProjectStatus, Task};
use chrono::{DateTime, Utc};

/// Keep the records matching `predicate`, in their original order.
pub fn filter_by<'a, R>(records: &'a [R], predicate: impl Fn(&R) -> bool) -> Vec<&'a R> {
    records.iter().filter(|r| predicate(r)).collect()
}

/// Task list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSelector {
    /// Every task.
    #[default]
    All,
    /// Not completed.
    Pending,
    /// Completed.
    Completed,
    /// High priority and not completed.
    High,
}

impl TaskSelector {
    /// Parse a selector; unknown values mean `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "high" => Self::High,
            _ => Self::All,
        }
    }

    /// Selector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::High => "high",
        }
    }

    /// Whether `task` passes this selector.
    #[must_use]
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Pending => task.is_pending(),
            Self::Completed => task.completed,
            Self::High => task.priority == Priority::High && task.is_pending(),
        }
    }
}

/// Note list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteSelector {
    /// Every note.
    #[default]
    All,
    /// Exact category match.
    Category(NoteCategory),
}

impl NoteSelector {
    /// Parse a selector; unknown values mean `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        NoteCategory::from_str(s).map_or(Self::All, Self::Category)
    }

    /// Selector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Category(category) => category.as_str(),
        }
    }

    /// Whether `note` passes this selector.
    #[must_use]
    pub fn matches(self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => note.category == category,
        }
    }
}

/// Project list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectSelector {
    /// Every project.
    #[default]
    All,
    /// Exact status match.
    Status(ProjectStatus),
    /// Deadline strictly in the past and not completed.
    Overdue,
}

impl ProjectSelector {
    /// Parse a selector; unknown values mean `All`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("overdue") {
            return Self::Overdue;
        }
        ProjectStatus::from_str(s).map_or(Self::All, Self::Status)
    }

    /// Selector name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Status(status) => status.as_str(),
            Self::Overdue => "overdue",
        }
    }

    /// Whether `project` passes this selector at `now`.
    #[must_use]
    pub fn matches(self, project: &Project, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Status(status) => project.status == status,
            Self::Overdue => project.is_overdue(now),
        }
    }
}

/// Tasks passing `selector`.
pub fn filter_tasks(tasks: &[Task], selector: TaskSelector) -> Vec<&Task> {
    filter_by(tasks, |t| selector.matches(t))
}

/// Notes passing `selector`.
pub fn filter_notes(notes: &[Note], selector: NoteSelector) -> Vec<&Note> {
    filter_by(notes, |n| selector.matches(n))
}

/// Projects passing `selector`, with overdue evaluated against `now`.
pub fn filter_projects(projects: &[Project], selector: ProjectSelector, now: DateTime<Utc>) -> Vec<&Project> {
    filter_by(projects, |p| selector.matches(p, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteDraft, ProjectDraft};
    use chrono::{NaiveDate, TimeZone};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn task(n: u128, completed: bool, priority: Priority) -> Task {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let mut task = Task::new(Uuid::from_u128(n), format!("task {n}"), priority, now);
        task.set_completed(completed, now);
        task
    }

    fn note(n: u128, category: NoteCategory) -> Note {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        Note::from_draft(Uuid::from_u128(n), NoteDraft::new(format!("note {n}"), "", category), now)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_task_selectors() {
        let tasks = vec![
            task(1, false, Priority::High),
            task(2, true, Priority::High),
            task(3, false, Priority::Low),
        ];
        let ids = |sel| filter_tasks(&tasks, sel).iter().map(|t| t.id.as_u128()).collect::<Vec<_>>();
        assert_eq!(ids(TaskSelector::All), [1, 2, 3]);
        assert_eq!(ids(TaskSelector::Pending), [1, 3]);
        assert_eq!(ids(TaskSelector::Completed), [2]);
        assert_eq!(ids(TaskSelector::High), [1]);
    }

    #[test]
    fn test_unknown_selectors_fall_back_to_all() {
        assert_eq!(TaskSelector::parse("someday"), TaskSelector::All);
        assert_eq!(NoteSelector::parse("recipes"), NoteSelector::All);
        assert_eq!(ProjectSelector::parse(""), ProjectSelector::All);
    }

    #[test]
    fn test_selector_parse_known_values() {
        assert_eq!(TaskSelector::parse("HIGH"), TaskSelector::High);
        assert_eq!(NoteSelector::parse("work"), NoteSelector::Category(NoteCategory::Work));
        assert_eq!(ProjectSelector::parse("Overdue"), ProjectSelector::Overdue);
        assert_eq!(ProjectSelector::parse("paused"), ProjectSelector::Status(ProjectStatus::Paused));
        assert_eq!(ProjectSelector::parse("paused").as_str(), "paused");
    }

    #[test]
    fn test_note_category_filter_keeps_order() {
        let notes = vec![
            note(1, NoteCategory::Work),
            note(2, NoteCategory::Work),
            note(3, NoteCategory::Personal),
        ];
        let work = filter_notes(&notes, NoteSelector::parse("work"));
        let ids: Vec<u128> = work.iter().map(|n| n.id.as_u128()).collect();
        assert_eq!(ids, [1, 2]);
    }

    #[test]
    fn test_project_overdue_selector() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let yesterday = today().pred_opt().unwrap();
        let tomorrow = today().succ_opt().unwrap();
        let make = |n, status, deadline| {
            Project::from_draft(
                Uuid::from_u128(n),
                ProjectDraft { name: format!("p{n}"), status, deadline, ..Default::default() },
                now,
            )
        };
        let projects = vec![
            make(1, ProjectStatus::Active, Some(yesterday)),
            make(2, ProjectStatus::Completed, Some(yesterday)),
            make(3, ProjectStatus::Active, None),
            make(4, ProjectStatus::Planning, Some(tomorrow)),
        ];
        let overdue = filter_projects(&projects, ProjectSelector::Overdue, now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id.as_u128(), 1);

        let active = filter_projects(&projects, ProjectSelector::Status(ProjectStatus::Active), now);
        assert_eq!(active.len(), 2);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        prop::collection::vec((any::<bool>(), 0usize..3), 0..30).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (done, p))| task(i as u128, done, Priority::ALL[p]))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subset(tasks in arb_tasks(), sel in 0usize..4) {
            let selector = [TaskSelector::All, TaskSelector::Pending, TaskSelector::Completed, TaskSelector::High][sel];
            let filtered = filter_tasks(&tasks, selector);

            prop_assert!(filtered.iter().all(|t| selector.matches(t)));
            let expected: Vec<&Task> = tasks.iter().filter(|t| selector.matches(t)).collect();
            prop_assert_eq!(filtered, expected);
        }

        #[test]
        fn prop_filter_all_is_identity(tasks in arb_tasks()) {
            let filtered: Vec<Task> = filter_tasks(&tasks, TaskSelector::All).into_iter().cloned().collect();
            prop_assert_eq!(filtered, tasks);
        }
    }
}
