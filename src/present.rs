//! View models for the list screens.
//!
//! Turns records, stats and the active selector into plain serializable
//! rows with German labels and `de-DE` formatted dates. Templates only
//! print these values and never compute anything.

use crate::id::short_id;
use crate::models::{
    CurrentScript, Note, NoteCategory, PersonalInfo, Priority, Project, ProjectStatus, SavedScript, Settings, Task,
    UNNAMED_SCRIPT,
};
use crate::query::{
    NoteQuery, NoteSelector, NoteStats, ProjectSelector, ProjectStats, ScriptStats, TaskSelector, TaskStats,
};
use crate::script_runner::ScriptTemplate;
use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, Offset, Timelike, Utc};
use serde::Serialize;

const MONTHS_SHORT: [&str; 12] =
    ["Jan.", "Feb.", "März", "Apr.", "Mai", "Juni", "Juli", "Aug.", "Sept.", "Okt.", "Nov.", "Dez."];
const MONTHS_LONG: [&str; 12] = [
    "Januar",
    "Februar",
    "März",
    "April",
    "Mai",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "Dezember",
];

/// Preview length for note bodies and script sources.
pub const PREVIEW_CHARS: usize = 100;

/// `16. Okt. 2026`
#[must_use]
pub fn format_date_short(date: NaiveDate) -> String {
    format!("{}. {} {}", date.day(), MONTHS_SHORT[date.month0() as usize], date.year())
}

/// `16. Oktober 2026`
#[must_use]
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{}. {} {}", date.day(), MONTHS_LONG[date.month0() as usize], date.year())
}

/// German display label for a priority.
#[must_use]
pub const fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Niedrig",
        Priority::Medium => "Mittel",
        Priority::High => "Hoch",
    }
}

/// German display label for a note category.
#[must_use]
pub const fn category_label(category: NoteCategory) -> &'static str {
    match category {
        NoteCategory::Personal => "Persönlich",
        NoteCategory::Work => "Arbeit",
        NoteCategory::Ideas => "Ideen",
        NoteCategory::Todo => "To-Do",
        NoteCategory::Other => "Sonstiges",
    }
}

/// German display label for a project status.
#[must_use]
pub const fn status_label(status: ProjectStatus) -> &'static str {
    match status {
        ProjectStatus::Planning => "Planung",
        ProjectStatus::Active => "Aktiv",
        ProjectStatus::Completed => "Abgeschlossen",
        ProjectStatus::Paused => "Pausiert",
        ProjectStatus::Cancelled => "Abgebrochen",
    }
}

/// Cut `text` to `max` characters, marking the cut with `...`.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

/// Headline and hint shown instead of an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub hint: String,
}

impl EmptyState {
    fn new(title: &str, hint: impl Into<String>) -> Self {
        Self { title: title.to_string(), hint: hint.into() }
    }
}

/// Empty-list message for a task selector.
#[must_use]
pub fn task_empty_state(selector: TaskSelector) -> EmptyState {
    match selector {
        TaskSelector::Pending => {
            EmptyState::new("Alle Aufgaben erledigt!", "Großartig! Du hast alle deine Aufgaben abgeschlossen.")
        }
        TaskSelector::Completed => {
            EmptyState::new("Noch keine erledigten Aufgaben", "Erledige deine ersten Aufgaben, um sie hier zu sehen.")
        }
        TaskSelector::High => EmptyState::new(
            "Keine dringenden Aufgaben",
            "Alles Wichtige ist erledigt oder du hast noch keine Aufgaben mit hoher Priorität.",
        ),
        TaskSelector::All => {
            EmptyState::new("Noch keine Aufgaben", "Füge deine erste Aufgabe hinzu, um loszulegen!")
        }
    }
}

/// Empty-list message for a note query; a search takes precedence.
#[must_use]
pub fn note_empty_state(query: &NoteQuery) -> EmptyState {
    if !query.search.is_empty() {
        return EmptyState::new(
            "Keine Ergebnisse",
            format!("Keine Notizen gefunden für \"{}\"", query.search.as_str()),
        );
    }
    match query.selector {
        NoteSelector::Category(category) => EmptyState::new(
            "Keine Notizen in dieser Kategorie",
            format!("Erstelle deine erste Notiz in der Kategorie \"{}\"", category_label(category)),
        ),
        NoteSelector::All => {
            EmptyState::new("Noch keine Notizen", "Erstelle deine erste Notiz, um loszulegen!")
        }
    }
}

/// Empty-list message for a project selector.
#[must_use]
pub fn project_empty_state(selector: ProjectSelector) -> EmptyState {
    match selector {
        ProjectSelector::Status(ProjectStatus::Active) => EmptyState::new(
            "Keine aktiven Projekte",
            "Starte dein erstes Projekt oder ändere den Status bestehender Projekte.",
        ),
        ProjectSelector::Status(ProjectStatus::Planning) => EmptyState::new(
            "Keine Projekte in Planung",
            "Erstelle ein neues Projekt oder ändere den Status bestehender Projekte.",
        ),
        ProjectSelector::Status(ProjectStatus::Completed) => EmptyState::new(
            "Noch keine abgeschlossenen Projekte",
            "Schließe deine ersten Projekte ab, um sie hier zu sehen.",
        ),
        ProjectSelector::Overdue => {
            EmptyState::new("Keine überfälligen Projekte", "Großartig! Alle deine Projekte sind im Zeitplan.")
        }
        _ => EmptyState::new("Noch keine Projekte", "Erstelle dein erstes Projekt, um loszulegen!"),
    }
}

/// One task line.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub short_id: String,
    pub text: String,
    pub completed: bool,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub created: String,
    pub completed_on: Option<String>,
}

/// One note card.
#[derive(Debug, Clone, Serialize)]
pub struct NoteRow {
    pub id: String,
    pub short_id: String,
    pub title: String,
    pub preview: String,
    pub category: NoteCategory,
    pub category_label: &'static str,
    pub created: String,
    /// Set only when the note was edited after creation.
    pub edited: Option<String>,
}

/// One project card.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    pub status_label: &'static str,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub created: String,
    pub deadline: Option<String>,
    pub overdue: bool,
    pub completed_on: Option<String>,
}

/// Everything shown in the project detail view.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub row: ProjectRow,
    pub notes: String,
    pub created_long: String,
    pub deadline_long: Option<String>,
    pub completed_long: Option<String>,
}

/// One saved script card.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptRow {
    pub id: String,
    pub short_id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub lines: usize,
    pub preview: String,
}

/// One starter template.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateRow {
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
}

/// A rendered list screen: rows, stats and the active view settings.
#[derive(Debug, Clone, Serialize)]
pub struct Page<R, S> {
    pub rows: Vec<R>,
    pub stats: S,
    pub filter: &'static str,
    pub sort: &'static str,
    pub search: String,
    pub empty: Option<EmptyState>,
}

/// The editor buffer.
#[derive(Debug, Clone, Serialize)]
pub struct EditorView {
    pub name: String,
    pub code: String,
    pub lines: usize,
    pub saved: String,
}

/// Counters across every area plus the run counter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Dashboard {
    pub tasks: TaskStats,
    pub notes: NoteStats,
    pub projects: ProjectStats,
    pub scripts: ScriptStats,
    pub executions: u64,
}

/// Settings as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub theme: &'static str,
    pub theme_label: &'static str,
    pub font_size: &'static str,
    pub font_size_label: &'static str,
}

/// Profile as displayed, with a ready `mailto:` link.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub info: PersonalInfo,
    pub mailto: String,
}

/// Builds view models in one timezone.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    offset: FixedOffset,
}

impl Default for Presenter {
    fn default() -> Self {
        Self::utc()
    }
}

impl Presenter {
    /// Show times in UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Show times in the machine's current local offset.
    #[must_use]
    pub fn local() -> Self {
        Self { offset: Local::now().offset().fix() }
    }

    /// `16. Okt. 2026, 14:05`
    #[must_use]
    pub fn format_datetime(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.offset);
        format!("{}, {:02}:{:02}", format_date_short(local.date_naive()), local.hour(), local.minute())
    }

    /// `16. Oktober 2026 um 14:05`
    #[must_use]
    pub fn format_datetime_long(&self, at: DateTime<Utc>) -> String {
        let local = at.with_timezone(&self.offset);
        format!("{} um {:02}:{:02}", format_date_long(local.date_naive()), local.hour(), local.minute())
    }

    /// Row for one task.
    #[must_use]
    pub fn task_row(&self, task: &Task) -> TaskRow {
        TaskRow {
            id: task.id.to_string(),
            short_id: short_id(&task.id),
            text: task.text.clone(),
            completed: task.completed,
            priority: task.priority,
            priority_label: priority_label(task.priority),
            created: self.format_datetime(task.created_at),
            completed_on: task.completed_at.map(|at| self.format_datetime(at)),
        }
    }

    /// Row for one note.
    #[must_use]
    pub fn note_row(&self, note: &Note) -> NoteRow {
        NoteRow {
            id: note.id.to_string(),
            short_id: short_id(&note.id),
            title: note.title.clone(),
            preview: truncate(&note.content, PREVIEW_CHARS),
            category: note.category,
            category_label: category_label(note.category),
            created: self.format_datetime(note.created_at),
            edited: note.was_edited().then(|| self.format_datetime(note.updated_at)),
        }
    }

    /// Row for one project; `now` decides the overdue flag.
    #[must_use]
    pub fn project_row(&self, project: &Project, now: DateTime<Utc>) -> ProjectRow {
        ProjectRow {
            id: project.id.to_string(),
            short_id: short_id(&project.id),
            name: project.name.clone(),
            description: project.description.clone(),
            status: project.status,
            status_label: status_label(project.status),
            priority: project.priority,
            priority_label: priority_label(project.priority),
            created: format_date_short(project.created_at.with_timezone(&self.offset).date_naive()),
            deadline: project.deadline.map(format_date_short),
            overdue: project.is_overdue(now),
            completed_on: project
                .completed_at
                .map(|at| format_date_short(at.with_timezone(&self.offset).date_naive())),
        }
    }

    /// Detail view of one project.
    #[must_use]
    pub fn project_detail(&self, project: &Project, now: DateTime<Utc>) -> ProjectDetail {
        ProjectDetail {
            row: self.project_row(project, now),
            notes: project.notes.clone(),
            created_long: self.format_datetime_long(project.created_at),
            deadline_long: project.deadline.map(format_date_long),
            completed_long: project.completed_at.map(|at| self.format_datetime_long(at)),
        }
    }

    /// Row for one saved script.
    #[must_use]
    pub fn script_row(&self, script: &SavedScript) -> ScriptRow {
        ScriptRow {
            id: script.id.to_string(),
            short_id: short_id(&script.id),
            name: script.name.clone(),
            description: script.description.clone(),
            created: self.format_datetime(script.created_at),
            lines: script.line_count(),
            preview: truncate(&script.source, PREVIEW_CHARS),
        }
    }

    /// Editor buffer; `None` shows an empty unnamed buffer.
    #[must_use]
    pub fn editor(&self, current: Option<&CurrentScript>) -> EditorView {
        match current {
            Some(script) => EditorView {
                name: script.name.clone(),
                code: script.code.clone(),
                lines: script.code.split('\n').count(),
                saved: self.format_datetime(script.timestamp),
            },
            None => EditorView { name: UNNAMED_SCRIPT.to_string(), code: String::new(), lines: 1, saved: String::new() },
        }
    }

    /// Task list screen.
    #[must_use]
    pub fn task_page(&self, tasks: &[&Task], stats: TaskStats, selector: TaskSelector, sort: &'static str) -> Page<TaskRow, TaskStats> {
        Page {
            rows: tasks.iter().map(|t| self.task_row(t)).collect(),
            stats,
            filter: selector.as_str(),
            sort,
            search: String::new(),
            empty: tasks.is_empty().then(|| task_empty_state(selector)),
        }
    }

    /// Note list screen.
    #[must_use]
    pub fn note_page(&self, notes: &[&Note], stats: NoteStats, query: &NoteQuery) -> Page<NoteRow, NoteStats> {
        Page {
            rows: notes.iter().map(|n| self.note_row(n)).collect(),
            stats,
            filter: query.selector.as_str(),
            sort: query.sort.as_str(),
            search: query.search.as_str().to_string(),
            empty: notes.is_empty().then(|| note_empty_state(query)),
        }
    }

    /// Project list screen.
    #[must_use]
    pub fn project_page(
        &self,
        projects: &[&Project],
        stats: ProjectStats,
        selector: ProjectSelector,
        sort: &'static str,
        now: DateTime<Utc>,
    ) -> Page<ProjectRow, ProjectStats> {
        Page {
            rows: projects.iter().map(|p| self.project_row(p, now)).collect(),
            stats,
            filter: selector.as_str(),
            sort,
            search: String::new(),
            empty: projects.is_empty().then(|| project_empty_state(selector)),
        }
    }

    /// Saved script list screen.
    #[must_use]
    pub fn script_page(&self, scripts: &[&SavedScript], stats: ScriptStats, sort: &'static str) -> Page<ScriptRow, ScriptStats> {
        Page {
            rows: scripts.iter().map(|s| self.script_row(s)).collect(),
            stats,
            filter: "all",
            sort,
            search: String::new(),
            empty: scripts.is_empty().then(|| {
                EmptyState::new("Noch keine gespeicherten Scripts", "Speichere dein erstes Script, um es hier zu sehen!")
            }),
        }
    }
}

/// Starter template list.
#[must_use]
pub fn template_rows(templates: &[ScriptTemplate]) -> Vec<TemplateRow> {
    templates
        .iter()
        .enumerate()
        .map(|(index, t)| TemplateRow { index, name: t.name, description: t.description })
        .collect()
}

/// Settings for display.
#[must_use]
pub fn settings_view(settings: Settings) -> SettingsView {
    use crate::models::{FontSize, Theme};
    SettingsView {
        theme: settings.theme.as_str(),
        theme_label: match settings.theme {
            Theme::Light => "Hell",
            Theme::Dark => "Dunkel",
        },
        font_size: settings.font_size.as_str(),
        font_size_label: match settings.font_size {
            FontSize::Small => "Klein",
            FontSize::Medium => "Mittel",
            FontSize::Large => "Groß",
        },
    }
}

/// Profile for display.
#[must_use]
pub fn profile_view(info: &PersonalInfo) -> ProfileView {
    ProfileView { info: info.clone(), mailto: info.mailto() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteDraft, ProjectDraft};
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).unwrap()
    }

    #[test]
    fn test_german_dates() {
        let presenter = Presenter::utc();
        assert_eq!(presenter.format_datetime(at()), "16. Okt. 2026, 14:05");
        assert_eq!(presenter.format_datetime_long(at()), "16. Oktober 2026 um 14:05");
        assert_eq!(format_date_short(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()), "1. März 2026");
        assert_eq!(format_date_short(NaiveDate::from_ymd_opt(2026, 9, 9).unwrap()), "9. Sept. 2026");
    }

    #[test]
    fn test_offset_shifts_date() {
        let presenter = Presenter { offset: FixedOffset::east_opt(10 * 3600).unwrap() };
        assert_eq!(presenter.format_datetime(at()), "17. Okt. 2026, 00:05");
    }

    #[test]
    fn test_labels() {
        assert_eq!(priority_label(Priority::High), "Hoch");
        assert_eq!(category_label(NoteCategory::Todo), "To-Do");
        assert_eq!(status_label(ProjectStatus::Cancelled), "Abgebrochen");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate("kurz", 10), "kurz");
        assert_eq!(truncate("Grüße aus Köln", 5), "Grüße...");
    }

    #[test]
    fn test_note_row_edited_only_after_edit() {
        let presenter = Presenter::utc();
        let mut note = Note::from_draft(Uuid::nil(), NoteDraft::new("t", "c", NoteCategory::Work), at());
        assert!(presenter.note_row(&note).edited.is_none());
        note.apply(NoteDraft::new("t", "c2", NoteCategory::Work), at() + Duration::minutes(10));
        assert_eq!(presenter.note_row(&note).edited.as_deref(), Some("16. Okt. 2026, 14:15"));
    }

    #[test]
    fn test_project_row_overdue_flag() {
        let presenter = Presenter::utc();
        let today = at().date_naive();
        let project = Project::from_draft(
            Uuid::nil(),
            ProjectDraft { name: "p".into(), status: ProjectStatus::Active, deadline: today.pred_opt(), ..Default::default() },
            at(),
        );
        let row = presenter.project_row(&project, at());
        assert!(row.overdue);
        assert_eq!(row.deadline.as_deref(), Some("15. Okt. 2026"));
        assert_eq!(row.status_label, "Aktiv");
    }

    #[test]
    fn test_empty_states() {
        assert_eq!(task_empty_state(TaskSelector::High).title, "Keine dringenden Aufgaben");
        let query = NoteQuery::parse("work", "", "newest");
        assert_eq!(note_empty_state(&query).hint, "Erstelle deine erste Notiz in der Kategorie \"Arbeit\"");
        let query = NoteQuery::parse("work", "Zebra", "newest");
        assert_eq!(note_empty_state(&query).hint, "Keine Notizen gefunden für \"zebra\"");
        assert_eq!(project_empty_state(ProjectSelector::Overdue).title, "Keine überfälligen Projekte");
        assert_eq!(project_empty_state(ProjectSelector::Status(ProjectStatus::Paused)).title, "Noch keine Projekte");
    }

    #[test]
    fn test_editor_defaults_to_unnamed() {
        let presenter = Presenter::utc();
        let view = presenter.editor(None);
        assert_eq!(view.name, "Unbenannt");
        assert!(view.saved.is_empty());

        let script = CurrentScript::new("demo", "a = 1\nprint(a)", at());
        let view = presenter.editor(Some(&script));
        assert_eq!(view.lines, 2);
        assert_eq!(view.saved, "16. Okt. 2026, 14:05");
    }

    #[test]
    fn test_page_carries_empty_state_only_when_empty() {
        let presenter = Presenter::utc();
        let page = presenter.task_page(&[], TaskStats::default(), TaskSelector::All, "newest");
        assert!(page.empty.is_some());

        let task = Task::new(Uuid::nil(), "x", Priority::Low, at());
        let page = presenter.task_page(&[&task], TaskStats::default(), TaskSelector::All, "newest");
        assert!(page.empty.is_none());
        assert_eq!(page.rows[0].priority_label, "Niedrig");
    }
}
