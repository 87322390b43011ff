//! Sort engine.
//!
//! Every sort returns a new sequence and leaves the input alone. All
//! comparators go through the stable `sort_by`, so equal keys keep their
//! pre-sort order and the list never jitters between renders.

use crate::models::{Note, Project, SavedScript, Task};
use std::cmp::Ordering;

/// Fold a string for locale-style ordering: case-insensitive, with German
/// umlauts and common accented letters sorting next to their base letter.
fn collation_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match c {
            'ä' | 'à' | 'á' | 'â' | 'ã' | 'å' => key.push('a'),
            'ö' | 'ò' | 'ó' | 'ô' | 'õ' => key.push('o'),
            'ü' | 'ù' | 'ú' | 'û' => key.push('u'),
            'é' | 'è' | 'ê' | 'ë' => key.push('e'),
            'í' | 'ì' | 'î' | 'ï' => key.push('i'),
            'ç' => key.push('c'),
            'ñ' => key.push('n'),
            'ß' => key.push_str("ss"),
            other => key.push(other),
        }
    }
    key
}

/// Locale-style ascending comparison of two display strings.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Records without a deadline go after every dated record.
fn deadline_cmp(a: &Project, b: &Project) -> Ordering {
    match (a.deadline, b.deadline) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Identity for `newest`, reversal for `oldest`, otherwise a stable sort.
fn ordered<'a, R>(
    items: &[&'a R],
    oldest: bool,
    cmp: Option<fn(&R, &R) -> Ordering>,
) -> Vec<&'a R> {
    let mut out = items.to_vec();
    match cmp {
        Some(cmp) => out.sort_by(|a, b| cmp(a, b)),
        None if oldest => out.reverse(),
        None => {}
    }
    out
}

macro_rules! sort_key_enum {
    ($(#[$doc:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            /// Newest first (stored order).
            #[default]
            Newest,
            /// Oldest first.
            Oldest,
            $(
                #[doc = concat!("By ", $text, ".")]
                $variant,
            )+
        }

        impl $name {
            /// Parse a sort key; unknown keys mean `Newest`.
            #[must_use]
            pub fn parse(s: &str) -> Self {
                match s.trim().to_lowercase().as_str() {
                    "oldest" => Self::Oldest,
                    $($text => Self::$variant,)+
                    _ => Self::Newest,
                }
            }

            /// Sort key name.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    Self::Newest => "newest",
                    Self::Oldest => "oldest",
                    $(Self::$variant => $text,)+
                }
            }
        }
    };
}

sort_key_enum!(
    /// Task sort keys.
    TaskSort { Priority => "priority" }
);
sort_key_enum!(
    /// Note sort keys.
    NoteSort { Title => "title", Category => "category" }
);
sort_key_enum!(
    /// Project sort keys.
    ProjectSort { Name => "name", Status => "status", Priority => "priority", Deadline => "deadline" }
);
sort_key_enum!(
    /// Saved script sort keys.
    ScriptSort { Name => "name" }
);

/// Order tasks by `key`.
pub fn sort_tasks<'a>(tasks: &[&'a Task], key: TaskSort) -> Vec<&'a Task> {
    let cmp: Option<fn(&Task, &Task) -> Ordering> = match key {
        TaskSort::Newest | TaskSort::Oldest => None,
        TaskSort::Priority => Some(|a: &Task, b: &Task| b.priority.rank().cmp(&a.priority.rank())),
    };
    ordered(tasks, key == TaskSort::Oldest, cmp)
}

/// Order notes by `key`.
pub fn sort_notes<'a>(notes: &[&'a Note], key: NoteSort) -> Vec<&'a Note> {
    let cmp: Option<fn(&Note, &Note) -> Ordering> = match key {
        NoteSort::Newest | NoteSort::Oldest => None,
        NoteSort::Title => Some(|a: &Note, b: &Note| locale_cmp(&a.title, &b.title)),
        NoteSort::Category => Some(|a: &Note, b: &Note| a.category.as_str().cmp(b.category.as_str())),
    };
    ordered(notes, key == NoteSort::Oldest, cmp)
}

/// Order projects by `key`.
pub fn sort_projects<'a>(projects: &[&'a Project], key: ProjectSort) -> Vec<&'a Project> {
    let cmp: Option<fn(&Project, &Project) -> Ordering> = match key {
        ProjectSort::Newest | ProjectSort::Oldest => None,
        ProjectSort::Name => Some(|a: &Project, b: &Project| locale_cmp(&a.name, &b.name)),
        ProjectSort::Status => Some(|a: &Project, b: &Project| a.status.as_str().cmp(b.status.as_str())),
        ProjectSort::Priority => Some(|a: &Project, b: &Project| b.priority.rank().cmp(&a.priority.rank())),
        ProjectSort::Deadline => Some(deadline_cmp),
    };
    ordered(projects, key == ProjectSort::Oldest, cmp)
}

/// Order saved scripts by `key`.
pub fn sort_scripts<'a>(scripts: &[&'a SavedScript], key: ScriptSort) -> Vec<&'a SavedScript> {
    let cmp: Option<fn(&SavedScript, &SavedScript) -> Ordering> = match key {
        ScriptSort::Newest | ScriptSort::Oldest => None,
        ScriptSort::Name => Some(|a: &SavedScript, b: &SavedScript| locale_cmp(&a.name, &b.name)),
    };
    ordered(scripts, key == ScriptSort::Oldest, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteCategory, NoteDraft, Priority, ProjectDraft, ProjectStatus};
    use chrono::{NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    fn project(n: u128, name: &str, priority: Priority, deadline: Option<NaiveDate>) -> Project {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        Project::from_draft(
            Uuid::from_u128(n),
            ProjectDraft { name: name.to_string(), priority, deadline, ..Default::default() },
            now,
        )
    }

    fn date(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 11, day)
    }

    fn ids(projects: &[&Project]) -> Vec<u128> {
        projects.iter().map(|p| p.id.as_u128()).collect()
    }

    #[test]
    fn test_unknown_key_is_newest() {
        assert_eq!(ProjectSort::parse("alphabetical"), ProjectSort::Newest);
        assert_eq!(NoteSort::parse("TITLE"), NoteSort::Title);
        assert_eq!(ScriptSort::parse("name").as_str(), "name");
        assert_eq!(TaskSort::parse("").as_str(), "newest");
    }

    #[test]
    fn test_newest_and_oldest() {
        let projects = [project(1, "a", Priority::Low, None), project(2, "b", Priority::Low, None)];
        let refs: Vec<&Project> = projects.iter().collect();
        assert_eq!(ids(&sort_projects(&refs, ProjectSort::Newest)), [1, 2]);
        assert_eq!(ids(&sort_projects(&refs, ProjectSort::Oldest)), [2, 1]);
    }

    #[test]
    fn test_deadline_puts_undated_last() {
        let projects = [
            project(1, "undated", Priority::Medium, None),
            project(2, "late", Priority::Medium, date(20)),
            project(3, "also undated", Priority::Medium, None),
            project(4, "early", Priority::Medium, date(3)),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        assert_eq!(ids(&sort_projects(&refs, ProjectSort::Deadline)), [4, 2, 1, 3]);
    }

    #[test]
    fn test_priority_descending_and_stable() {
        let projects = [
            project(1, "a", Priority::Low, None),
            project(2, "b", Priority::High, None),
            project(3, "c", Priority::Medium, None),
            project(4, "d", Priority::High, None),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        assert_eq!(ids(&sort_projects(&refs, ProjectSort::Priority)), [2, 4, 3, 1]);
    }

    #[test]
    fn test_name_sort_is_case_and_umlaut_insensitive() {
        let projects = [
            project(1, "zebra", Priority::Low, None),
            project(2, "Äpfel", Priority::Low, None),
            project(3, "Birnen", Priority::Low, None),
            project(4, "apfel", Priority::Low, None),
        ];
        let refs: Vec<&Project> = projects.iter().collect();
        let sorted = sort_projects(&refs, ProjectSort::Name);
        let names: Vec<&str> = sorted.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Äpfel", "apfel", "Birnen", "zebra"]);
    }

    #[test]
    fn test_status_sort_uses_raw_value() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let projects: Vec<Project> = [ProjectStatus::Planning, ProjectStatus::Active, ProjectStatus::Cancelled]
            .into_iter()
            .enumerate()
            .map(|(i, status)| {
                Project::from_draft(
                    Uuid::from_u128(i as u128),
                    ProjectDraft { name: "p".into(), status, ..Default::default() },
                    now,
                )
            })
            .collect();
        let refs: Vec<&Project> = projects.iter().collect();
        let sorted = sort_projects(&refs, ProjectSort::Status);
        let statuses: Vec<&str> = sorted.iter().map(|p| p.status.as_str()).collect();
        assert_eq!(statuses, ["active", "cancelled", "planning"]);
    }

    #[test]
    fn test_note_category_sort() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let notes: Vec<Note> = [NoteCategory::Work, NoteCategory::Ideas, NoteCategory::Personal]
            .into_iter()
            .enumerate()
            .map(|(i, c)| Note::from_draft(Uuid::from_u128(i as u128), NoteDraft::new("n", "", c), now))
            .collect();
        let refs: Vec<&Note> = notes.iter().collect();
        let sorted = sort_notes(&refs, NoteSort::Category);
        let cats: Vec<&str> = sorted.iter().map(|n| n.category.as_str()).collect();
        assert_eq!(cats, ["ideas", "personal", "work"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let projects = [project(1, "b", Priority::Low, None), project(2, "a", Priority::Low, None)];
        let refs: Vec<&Project> = projects.iter().collect();
        let _ = sort_projects(&refs, ProjectSort::Name);
        assert_eq!(ids(&refs), [1, 2]);
    }

    fn arb_projects() -> impl Strategy<Value = Vec<Project>> {
        prop::collection::vec((0usize..3, prop::option::of(1u32..5)), 0..25).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (p, day))| project(i as u128, "p", Priority::ALL[p], day.and_then(date)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_priority_sort_is_stable(projects in arb_projects()) {
            let refs: Vec<&Project> = projects.iter().collect();
            let sorted = sort_projects(&refs, ProjectSort::Priority);
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert!(a.priority.rank() >= b.priority.rank());
                if a.priority == b.priority {
                    prop_assert!(a.id.as_u128() < b.id.as_u128());
                }
            }
        }

        #[test]
        fn prop_deadline_sort_is_stable(projects in arb_projects()) {
            let refs: Vec<&Project> = projects.iter().collect();
            let sorted = sort_projects(&refs, ProjectSort::Deadline);
            for pair in sorted.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                prop_assert_ne!(deadline_cmp(a, b), Ordering::Greater);
                if a.deadline == b.deadline {
                    prop_assert!(a.id.as_u128() < b.id.as_u128());
                }
            }
        }

        #[test]
        fn prop_newest_is_idempotent(projects in arb_projects()) {
            let refs: Vec<&Project> = projects.iter().collect();
            let once = sort_projects(&refs, ProjectSort::Newest);
            let twice = sort_projects(&once, ProjectSort::Newest);
            prop_assert_eq!(once, twice);
        }
    }
}
