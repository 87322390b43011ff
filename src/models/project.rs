//! Project record.
//!
//! # Invariants
//! - `completed_at` is `Some` if and only if `status == Completed`.
//! - Overdue is derived at query time from the deadline and the current
//!   instant; it is never stored. A deadline counts from midnight UTC of
//!   its day, so a project is overdue once its deadline day has begun.

use super::{InvalidChoice, Priority};
use crate::id::RecordId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

/// Project lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Not started yet (default).
    #[default]
    Planning,
    /// In progress.
    Active,
    /// Finished.
    Completed,
    /// On hold.
    Paused,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 5] =
        [Self::Planning, Self::Active, Self::Completed, Self::Paused, Self::Cancelled];

    /// Parse a status from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid status.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidChoice> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(InvalidChoice::new(
                "status",
                s,
                "planning, active, completed, paused, cancelled",
            )),
        }
    }

    /// Raw enum string, also used as the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Older records store a missing deadline as `""`.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// A project with status tracking and an optional deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: RecordId,
    /// Name (required).
    pub name: String,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ProjectStatus,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// Optional due date.
    #[serde(default, deserialize_with = "blank_date_as_none")]
    pub deadline: Option<NaiveDate>,
    /// Priority.
    #[serde(default)]
    pub priority: Priority,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last edited.
    pub updated_at: DateTime<Utc>,
    /// When the project entered `completed`.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// User-editable fields of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Name.
    pub name: String,
    /// Status.
    pub status: ProjectStatus,
    /// Description.
    pub description: String,
    /// Deadline.
    pub deadline: Option<NaiveDate>,
    /// Priority.
    pub priority: Priority,
    /// Notes.
    pub notes: String,
}

impl Project {
    /// Create a project from an already validated draft.
    pub fn from_draft(id: RecordId, draft: ProjectDraft, now: DateTime<Utc>) -> Self {
        let mut project = Self {
            id,
            name: draft.name,
            status: ProjectStatus::Planning,
            description: draft.description,
            deadline: draft.deadline,
            priority: draft.priority,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
            completed_at: None,
        };
        project.apply_status(draft.status, now);
        project
    }

    /// Replace all mutable fields and bump `updated_at`.
    pub fn apply(&mut self, draft: ProjectDraft, now: DateTime<Utc>) {
        self.name = draft.name;
        self.description = draft.description;
        self.deadline = draft.deadline;
        self.priority = draft.priority;
        self.notes = draft.notes;
        self.apply_status(draft.status, now);
        self.updated_at = now;
    }

    /// Change status, setting or clearing `completed_at` on the transition.
    ///
    /// Staying in `completed` keeps the original completion time.
    pub fn apply_status(&mut self, status: ProjectStatus, now: DateTime<Utc>) {
        let was_completed = self.status == ProjectStatus::Completed;
        let is_completed = status == ProjectStatus::Completed;
        self.status = status;
        if is_completed && (!was_completed || self.completed_at.is_none()) {
            self.completed_at = Some(now);
        } else if !is_completed {
            self.completed_at = None;
        }
    }

    /// Make `completed_at` agree with `status` for a record that bypassed
    /// [`Project::apply_status`]. A completed project without a completion
    /// time takes its last edit time.
    pub fn settle_completion(&mut self) {
        if self.status == ProjectStatus::Completed {
            self.completed_at = self.completed_at.or(Some(self.updated_at));
        } else {
            self.completed_at = None;
        }
    }

    /// Deadline (midnight UTC) strictly before `now` and not completed.
    #[must_use]
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != ProjectStatus::Completed
            && self.deadline.and_then(|d| d.and_hms_opt(0, 0, 0)).is_some_and(|start| start.and_utc() < now)
    }

    /// The current draft of this project, for edit forms.
    #[must_use]
    pub fn to_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.name.clone(),
            status: self.status,
            description: self.description.clone(),
            deadline: self.deadline,
            priority: self.priority,
            notes: self.notes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn draft(status: ProjectStatus, deadline: Option<NaiveDate>) -> ProjectDraft {
        ProjectDraft { name: "Launch".to_string(), status, deadline, ..Default::default() }
    }

    #[test]
    fn test_created_completed_has_timestamp() {
        let project = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Completed, None), now());
        assert_eq!(project.completed_at, Some(now()));
    }

    #[test]
    fn test_status_transitions_keep_invariant() {
        let mut project = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Active, None), now());
        assert_eq!(project.completed_at, None);

        let later = now() + chrono::Duration::hours(1);
        project.apply_status(ProjectStatus::Completed, later);
        assert_eq!(project.completed_at, Some(later));

        project.apply_status(ProjectStatus::Completed, later + chrono::Duration::hours(1));
        assert_eq!(project.completed_at, Some(later));

        project.apply_status(ProjectStatus::Paused, later);
        assert_eq!(project.completed_at, None);
    }

    #[test]
    fn test_settle_completion_repairs_both_directions() {
        let mut done = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Completed, None), now());
        done.completed_at = None;
        done.settle_completion();
        assert_eq!(done.completed_at, Some(done.updated_at));

        let mut live = Project::from_draft(Uuid::from_u128(2), draft(ProjectStatus::Active, None), now());
        live.completed_at = Some(now());
        live.settle_completion();
        assert_eq!(live.completed_at, None);

        let earlier = now() - chrono::Duration::days(3);
        let mut kept = Project::from_draft(Uuid::from_u128(3), draft(ProjectStatus::Completed, None), earlier);
        kept.updated_at = now();
        kept.settle_completion();
        assert_eq!(kept.completed_at, Some(earlier));
    }

    #[test]
    fn test_overdue_yesterday_active() {
        let yesterday = today().pred_opt().unwrap();
        let active = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Active, Some(yesterday)), now());
        assert!(active.is_overdue(now()));

        let done = Project::from_draft(Uuid::from_u128(2), draft(ProjectStatus::Completed, Some(yesterday)), now());
        assert!(!done.is_overdue(now()));
    }

    #[test]
    fn test_overdue_once_deadline_day_has_begun() {
        let due_today = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Active, Some(today())), now());
        assert!(due_today.is_overdue(Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap()));
        assert!(!due_today.is_overdue(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()));
        assert!(!due_today.is_overdue(Utc.with_ymd_and_hms(2026, 10, 15, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_future_or_missing_deadline_is_not_overdue() {
        let tomorrow = today().succ_opt();
        let later = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Active, tomorrow), now());
        assert!(!later.is_overdue(now()));

        let no_deadline = Project::from_draft(Uuid::from_u128(2), draft(ProjectStatus::Active, None), now());
        assert!(!no_deadline.is_overdue(now()));
    }

    #[test]
    fn test_apply_replaces_fields_and_bumps_updated() {
        let mut project = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Planning, None), now());
        let later = now() + chrono::Duration::days(1);
        project.apply(
            ProjectDraft {
                name: "Relaunch".to_string(),
                status: ProjectStatus::Active,
                description: "second try".to_string(),
                deadline: Some(today()),
                priority: Priority::High,
                notes: String::new(),
            },
            later,
        );
        assert_eq!(project.name, "Relaunch");
        assert_eq!(project.priority, Priority::High);
        assert_eq!(project.created_at, now());
        assert_eq!(project.updated_at, later);
        assert_eq!(project.to_draft().description, "second try");
    }

    #[test]
    fn test_deadline_serializes_as_date() {
        let project = Project::from_draft(Uuid::from_u128(1), draft(ProjectStatus::Active, Some(today())), now());
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["deadline"], "2026-10-16");
        assert_eq!(value["status"], "active");
    }

    #[test]
    fn test_blank_deadline_reads_as_none() {
        let json = r#"{
            "id": "00000000-0000-0000-0000-000000000009",
            "name": "Legacy",
            "deadline": "",
            "createdAt": "2026-10-01T08:00:00Z",
            "updatedAt": "2026-10-01T08:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.deadline, None);
        assert_eq!(project.status, ProjectStatus::Planning);
        assert_eq!(project.priority, Priority::Medium);
    }
}
