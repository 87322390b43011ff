//! Application state and per-domain operations.
//!
//! [`App`] owns the persistence gateway and every collection. Mutating
//! operations follow the same sequence: validate, mutate in memory, persist
//! the whole collection. When the write fails the in-memory change stays
//! and the error is returned to the caller.
//!
//! Operations on an id that no longer exists change nothing and report
//! `Ok(None)` / `Ok(false)`. Destructive operations ask a [`Confirm`] gate
//! before touching anything.

use crate::collection::{Collection, Record};
use crate::error::{Error, Result};
use crate::id::{generate_id, short_id, RecordId};
use crate::models::{
    CurrentScript, FontSize, Note, NoteDraft, PersonalInfo, Priority, ProfileDraft, Project, ProjectDraft,
    ProjectStatus, SavedScript, ScriptDraft, Settings, Task, Theme,
};
use crate::query::{
    self, stats, NoteQuery, NoteStats, ProjectSelector, ProjectSort, ProjectStats, ScriptSort, ScriptStats,
    TaskSelector, TaskSort, TaskStats,
};
use crate::script_runner::{self, TEMPLATES};
use crate::storage::keys;
use crate::traits::{Confirm, KeyValueStore};
use crate::transfer::{self, Backup};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Prompt shown before wiping all data.
pub const CLEAR_ALL_PROMPT: &str =
    "Möchtest du wirklich alle Daten löschen? Diese Aktion kann nicht rückgängig gemacht werden.";

/// Trim `value` and reject it when blank.
fn required(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(message));
    }
    Ok(trimmed.to_string())
}

fn load_value<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    store.get(key)?.map(|raw| serde_json::from_str(&raw)).transpose().map_err(Error::from)
}

fn save_value<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    store.set(key, &serde_json::to_string(value)?)
}

/// Records touched by a backup restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    /// Records written across all restored collections.
    pub records: usize,
    /// Whether settings were replaced.
    pub settings: bool,
}

/// The whole application state.
pub struct App<S: KeyValueStore> {
    store: S,
    clock: fn() -> DateTime<Utc>,
    tasks: Collection<Task>,
    notes: Collection<Note>,
    projects: Collection<Project>,
    scripts: Collection<SavedScript>,
    settings: Settings,
    profile: PersonalInfo,
    current_script: Option<CurrentScript>,
    execution_count: u64,
}

impl<S: KeyValueStore> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("tasks", &self.tasks.len())
            .field("notes", &self.notes.len())
            .field("projects", &self.projects.len())
            .field("scripts", &self.scripts.len())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl<S: KeyValueStore> App<S> {
    /// Load every collection and setting from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway cannot be read or a stored blob is
    /// not valid JSON.
    pub fn load(store: S) -> Result<Self> {
        let tasks = Collection::load(&store)?;
        let notes = Collection::load(&store)?;
        let projects = Collection::load(&store)?;
        let scripts = Collection::load(&store)?;
        let settings = load_value(&store, keys::SETTINGS)?.unwrap_or_default();
        let profile = load_value(&store, keys::PERSONAL_INFO)?.unwrap_or_default();
        let current_script = load_value(&store, keys::CURRENT_SCRIPT)?;
        let execution_count =
            store.get(keys::EXECUTION_COUNT)?.and_then(|raw| raw.trim().parse().ok()).unwrap_or(0);

        log::debug!(
            "event=app_load module=app status=ok tasks={} notes={} projects={} scripts={}",
            tasks.len(),
            notes.len(),
            projects.len(),
            scripts.len()
        );
        Ok(Self {
            store,
            clock: Utc::now,
            tasks,
            notes,
            projects,
            scripts,
            settings,
            profile,
            current_script,
            execution_count,
        })
    }

    /// Replace the wall clock (used by tests).
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    /// Current time according to the app clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Today's date according to the app clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// The persistence gateway.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// All tasks, newest first.
    pub fn tasks(&self) -> &[Task] {
        self.tasks.records()
    }

    /// All notes, newest first.
    pub fn notes(&self) -> &[Note] {
        self.notes.records()
    }

    /// All projects, newest first.
    pub fn projects(&self) -> &[Project] {
        self.projects.records()
    }

    /// All saved scripts, newest first.
    pub fn scripts(&self) -> &[SavedScript] {
        self.scripts.records()
    }

    /// UI settings.
    pub const fn settings(&self) -> Settings {
        self.settings
    }

    /// Personal info profile.
    pub const fn profile(&self) -> &PersonalInfo {
        &self.profile
    }

    /// The scratch script, if one was saved.
    pub const fn current_script(&self) -> Option<&CurrentScript> {
        self.current_script.as_ref()
    }

    /// How many scripts were run so far.
    pub const fn execution_count(&self) -> u64 {
        self.execution_count
    }

    /// Resolve a task id prefix.
    pub fn resolve_task(&self, prefix: &str) -> Option<RecordId> {
        self.tasks.resolve(prefix)
    }

    /// Resolve a note id prefix.
    pub fn resolve_note(&self, prefix: &str) -> Option<RecordId> {
        self.notes.resolve(prefix)
    }

    /// Resolve a project id prefix.
    pub fn resolve_project(&self, prefix: &str) -> Option<RecordId> {
        self.projects.resolve(prefix)
    }

    /// Resolve a saved script id prefix.
    pub fn resolve_script(&self, prefix: &str) -> Option<RecordId> {
        self.scripts.resolve(prefix)
    }

    // Tasks

    /// Add a pending task at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank text, or a storage error if the
    /// write fails.
    pub fn add_task(&mut self, text: &str, priority: Priority) -> Result<Task> {
        let text = required(text, "Bitte eine Aufgabe eingeben")?;
        let task = Task::new(generate_id(), text, priority, self.now());
        self.tasks.prepend(task.clone());
        self.tasks.save(&self.store)?;
        log::info!("event=task_add module=app status=ok id={} priority={priority}", short_id(&task.id));
        Ok(task)
    }

    /// Flip a task between pending and completed.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn toggle_task(&mut self, id: RecordId) -> Result<Option<Task>> {
        let now = self.now();
        let Some(task) = self.tasks.get_mut(id) else {
            return Ok(None);
        };
        task.set_completed(!task.completed, now);
        let task = task.clone();
        self.tasks.save(&self.store)?;
        log::info!(
            "event=task_toggle module=app status=ok id={} completed={}",
            short_id(&id),
            task.completed
        );
        Ok(Some(task))
    }

    /// Replace a task's text and priority.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank text, or a storage error if the
    /// write fails.
    pub fn edit_task(&mut self, id: RecordId, text: &str, priority: Priority) -> Result<Option<Task>> {
        let text = required(text, "Bitte eine Aufgabe eingeben")?;
        let Some(task) = self.tasks.get_mut(id) else {
            return Ok(None);
        };
        task.text = text;
        task.priority = priority;
        let task = task.clone();
        self.tasks.save(&self.store)?;
        log::info!("event=task_edit module=app status=ok id={}", short_id(&id));
        Ok(Some(task))
    }

    /// Delete one task after confirmation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn delete_task(&mut self, id: RecordId, confirm: &dyn Confirm) -> Result<bool> {
        delete_record(&mut self.tasks, &self.store, id, confirm, "Möchtest du diese Aufgabe wirklich löschen?")
    }

    /// Delete every completed task after confirmation; returns how many went.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn clear_completed_tasks(&mut self, confirm: &dyn Confirm) -> Result<usize> {
        let completed = self.tasks.records().iter().filter(|t| t.completed).count();
        if completed == 0 {
            return Ok(0);
        }
        if !confirm.confirm(&format!("Möchtest du wirklich alle {completed} erledigten Aufgaben löschen?")) {
            log::info!("event=task_clear_completed module=app status=declined");
            return Ok(0);
        }
        let removed = self.tasks.retain(Task::is_pending);
        self.tasks.save(&self.store)?;
        log::info!("event=task_clear_completed module=app status=ok removed={removed}");
        Ok(removed)
    }

    /// Visible tasks.
    pub fn task_view(&self, selector: TaskSelector, sort: TaskSort) -> Vec<&Task> {
        query::task_view(self.tasks.records(), selector, sort)
    }

    /// Task summary counts.
    pub fn task_stats(&self) -> TaskStats {
        stats::task_stats(self.tasks.records())
    }

    // Notes

    fn validate_note(draft: NoteDraft) -> Result<NoteDraft> {
        let title = draft.title.trim();
        let content = draft.content.trim();
        if title.is_empty() && content.is_empty() {
            return Err(Error::validation("Titel oder Inhalt eingeben"));
        }
        if title.is_empty() {
            return Err(Error::validation("Bitte einen Titel eingeben"));
        }
        Ok(NoteDraft::new(title, content, draft.category))
    }

    /// Add a note at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is blank, or a storage
    /// error if the write fails.
    pub fn add_note(&mut self, draft: NoteDraft) -> Result<Note> {
        let draft = Self::validate_note(draft)?;
        let note = Note::from_draft(generate_id(), draft, self.now());
        self.notes.prepend(note.clone());
        self.notes.save(&self.store)?;
        log::info!("event=note_add module=app status=ok id={} category={}", short_id(&note.id), note.category);
        Ok(note)
    }

    /// Replace a note's fields and bump its update time.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is blank, or a storage
    /// error if the write fails.
    pub fn edit_note(&mut self, id: RecordId, draft: NoteDraft) -> Result<Option<Note>> {
        if draft.title.trim().is_empty() {
            return Err(Error::validation("Bitte einen Titel eingeben"));
        }
        let draft = Self::validate_note(draft)?;
        let now = self.now();
        let Some(note) = self.notes.get_mut(id) else {
            return Ok(None);
        };
        note.apply(draft, now);
        let note = note.clone();
        self.notes.save(&self.store)?;
        log::info!("event=note_edit module=app status=ok id={}", short_id(&id));
        Ok(Some(note))
    }

    /// Delete one note after confirmation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn delete_note(&mut self, id: RecordId, confirm: &dyn Confirm) -> Result<bool> {
        delete_record(&mut self.notes, &self.store, id, confirm, "Möchtest du diese Notiz wirklich löschen?")
    }

    /// Visible notes.
    pub fn note_view(&self, query: &NoteQuery) -> Vec<&Note> {
        query::note_view(self.notes.records(), query)
    }

    /// Note summary counts.
    pub fn note_stats(&self) -> NoteStats {
        stats::note_stats(self.notes.records(), self.now())
    }

    // Projects

    fn validate_project(mut draft: ProjectDraft) -> Result<ProjectDraft> {
        draft.name = required(&draft.name, "Bitte einen Projektnamen eingeben")?;
        draft.description = draft.description.trim().to_string();
        draft.notes = draft.notes.trim().to_string();
        Ok(draft)
    }

    /// Add a project at the top of the list.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank, or a storage error
    /// if the write fails.
    pub fn add_project(&mut self, draft: ProjectDraft) -> Result<Project> {
        let draft = Self::validate_project(draft)?;
        let project = Project::from_draft(generate_id(), draft, self.now());
        self.projects.prepend(project.clone());
        self.projects.save(&self.store)?;
        log::info!(
            "event=project_add module=app status=ok id={} project_status={}",
            short_id(&project.id),
            project.status
        );
        Ok(project)
    }

    /// Replace a project's fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the name is blank, or a storage error
    /// if the write fails.
    pub fn edit_project(&mut self, id: RecordId, draft: ProjectDraft) -> Result<Option<Project>> {
        let draft = Self::validate_project(draft)?;
        let now = self.now();
        let Some(project) = self.projects.get_mut(id) else {
            return Ok(None);
        };
        project.apply(draft, now);
        let project = project.clone();
        self.projects.save(&self.store)?;
        log::info!("event=project_edit module=app status=ok id={}", short_id(&id));
        Ok(Some(project))
    }

    /// Change only a project's status.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn set_project_status(&mut self, id: RecordId, status: ProjectStatus) -> Result<Option<Project>> {
        let now = self.now();
        let Some(project) = self.projects.get_mut(id) else {
            return Ok(None);
        };
        project.apply_status(status, now);
        project.updated_at = now;
        let project = project.clone();
        self.projects.save(&self.store)?;
        log::info!("event=project_status module=app status=ok id={} project_status={status}", short_id(&id));
        Ok(Some(project))
    }

    /// Copy a project as `<name> (Kopie)` in planning status.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn duplicate_project(&mut self, id: RecordId) -> Result<Option<Project>> {
        let Some(original) = self.projects.get(id) else {
            return Ok(None);
        };
        let mut draft = original.to_draft();
        draft.name = format!("{} (Kopie)", original.name);
        draft.status = ProjectStatus::Planning;
        let copy = Project::from_draft(generate_id(), draft, self.now());
        self.projects.prepend(copy.clone());
        self.projects.save(&self.store)?;
        log::info!(
            "event=project_duplicate module=app status=ok id={} source={}",
            short_id(&copy.id),
            short_id(&id)
        );
        Ok(Some(copy))
    }

    /// Delete one project after confirmation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn delete_project(&mut self, id: RecordId, confirm: &dyn Confirm) -> Result<bool> {
        delete_record(&mut self.projects, &self.store, id, confirm, "Möchtest du dieses Projekt wirklich löschen?")
    }

    /// Visible projects, with overdue evaluated now.
    pub fn project_view(&self, selector: ProjectSelector, sort: ProjectSort) -> Vec<&Project> {
        query::project_view(self.projects.records(), selector, sort, self.now())
    }

    /// Project summary counts.
    pub fn project_stats(&self) -> ProjectStats {
        stats::project_stats(self.projects.records(), self.now())
    }

    // Scripts

    fn validate_script(draft: ScriptDraft) -> Result<ScriptDraft> {
        if draft.source.trim().is_empty() {
            return Err(Error::validation("Kein Code zum Speichern vorhanden"));
        }
        let name = required(&draft.name, "Bitte einen Namen eingeben")?;
        Ok(ScriptDraft { name, description: draft.description.trim().to_string(), source: draft.source })
    }

    fn autosave_scratch(&mut self, name: &str, code: &str) -> Result<CurrentScript> {
        let scratch = CurrentScript::new(name, code, self.now());
        save_value(&self.store, keys::CURRENT_SCRIPT, &scratch)?;
        self.current_script = Some(scratch.clone());
        Ok(scratch)
    }

    /// Save a script to the library; the editor takes on its name.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the source or name is blank, or a
    /// storage error if a write fails.
    pub fn save_script(&mut self, draft: ScriptDraft) -> Result<SavedScript> {
        let draft = Self::validate_script(draft)?;
        let script = SavedScript::from_draft(generate_id(), draft, self.now());
        self.scripts.prepend(script.clone());
        self.scripts.save(&self.store)?;
        self.autosave_scratch(&script.name, &script.source)?;
        log::info!(
            "event=script_save module=app status=ok id={} lines={}",
            short_id(&script.id),
            script.line_count()
        );
        Ok(script)
    }

    /// Replace a saved script's fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the source or name is blank, or a
    /// storage error if the write fails.
    pub fn edit_script(&mut self, id: RecordId, draft: ScriptDraft) -> Result<Option<SavedScript>> {
        let draft = Self::validate_script(draft)?;
        let now = self.now();
        let Some(script) = self.scripts.get_mut(id) else {
            return Ok(None);
        };
        script.apply(draft, now);
        let script = script.clone();
        self.scripts.save(&self.store)?;
        log::info!("event=script_edit module=app status=ok id={}", short_id(&id));
        Ok(Some(script))
    }

    /// Delete a saved script after confirmation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn delete_script(&mut self, id: RecordId, confirm: &dyn Confirm) -> Result<bool> {
        let Some(name) = self.scripts.get(id).map(|s| s.name.clone()) else {
            return Ok(false);
        };
        let prompt = format!("Möchtest du das Script \"{name}\" wirklich löschen?");
        delete_record(&mut self.scripts, &self.store, id, confirm, &prompt)
    }

    /// Autosave the editor contents.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn set_current_script(&mut self, name: &str, code: &str) -> Result<CurrentScript> {
        self.autosave_scratch(name, code)
    }

    /// Empty the editor after confirmation.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn clear_current_script(&mut self, confirm: &dyn Confirm) -> Result<bool> {
        if !confirm.confirm("Möchtest du den Editor wirklich leeren?") {
            return Ok(false);
        }
        self.autosave_scratch("", "")?;
        log::info!("event=script_clear module=app status=ok");
        Ok(true)
    }

    /// Open a saved script in the editor.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn load_script(&mut self, id: RecordId) -> Result<Option<CurrentScript>> {
        let Some((name, source)) = self.scripts.get(id).map(|s| (s.name.clone(), s.source.clone())) else {
            return Ok(None);
        };
        self.autosave_scratch(&name, &source).map(Some)
    }

    /// Open a built-in starter script in the editor.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn load_template(&mut self, index: usize) -> Result<Option<CurrentScript>> {
        let Some(template) = TEMPLATES.get(index) else {
            return Ok(None);
        };
        self.autosave_scratch(template.name, template.code).map(Some)
    }

    /// Run `source` through the simulator and count the run.
    ///
    /// # Errors
    ///
    /// Returns a validation error for blank source, or a storage error if the
    /// counter cannot be written.
    pub fn run_source(&mut self, source: &str) -> Result<String> {
        let output = script_runner::simulate(source)?;
        self.execution_count += 1;
        self.store.set(keys::EXECUTION_COUNT, &self.execution_count.to_string())?;
        log::info!("event=script_run module=app status=ok runs={}", self.execution_count);
        Ok(output)
    }

    /// Run whatever is in the editor.
    ///
    /// # Errors
    ///
    /// Same as [`App::run_source`].
    pub fn run_current_script(&mut self) -> Result<String> {
        let code = self.current_script.as_ref().map(|s| s.code.clone()).unwrap_or_default();
        self.run_source(&code)
    }

    /// Visible saved scripts.
    pub fn script_view(&self, sort: ScriptSort) -> Vec<&SavedScript> {
        query::script_view(self.scripts.records(), sort)
    }

    /// Script library summary.
    pub fn script_stats(&self) -> ScriptStats {
        stats::script_stats(self.scripts.records())
    }

    // Settings and profile

    /// Switch between light and dark theme.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.settings.theme = self.settings.theme.toggled();
        save_value(&self.store, keys::SETTINGS, &self.settings)?;
        log::info!("event=settings_theme module=app status=ok theme={}", self.settings.theme.as_str());
        Ok(self.settings.theme)
    }

    /// Set the base font size.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn set_font_size(&mut self, size: FontSize) -> Result<()> {
        self.settings.font_size = size;
        save_value(&self.store, keys::SETTINGS, &self.settings)?;
        log::info!("event=settings_font_size module=app status=ok size={}", size.as_str());
        Ok(())
    }

    /// Save the profile; blank fields fall back to their placeholders.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn save_profile(&mut self, draft: &ProfileDraft) -> Result<&PersonalInfo> {
        self.profile = PersonalInfo::from_draft(draft);
        save_value(&self.store, keys::PERSONAL_INFO, &self.profile)?;
        log::info!("event=profile_save module=app status=ok");
        Ok(&self.profile)
    }

    // Data management

    /// Remove tasks, notes, projects and the scratch script after
    /// confirmation. Saved scripts, settings and the profile stay.
    ///
    /// # Errors
    ///
    /// Returns a storage error if a key cannot be removed.
    pub fn clear_all_data(&mut self, confirm: &dyn Confirm) -> Result<bool> {
        if !confirm.confirm(CLEAR_ALL_PROMPT) {
            log::info!("event=clear_all module=app status=declined");
            return Ok(false);
        }
        self.tasks.clear();
        self.notes.clear();
        self.projects.clear();
        self.current_script = None;
        Collection::<Task>::forget(&self.store)?;
        Collection::<Note>::forget(&self.store)?;
        Collection::<Project>::forget(&self.store)?;
        self.store.remove(keys::CURRENT_SCRIPT)?;
        log::warn!("event=clear_all module=app status=ok");
        Ok(true)
    }

    /// Export all tasks.
    ///
    /// # Errors
    ///
    /// Returns a validation error when there are no tasks.
    pub fn export_tasks(&self) -> Result<String> {
        transfer::export_collection(self.tasks.records(), &self.task_stats(), self.now())
    }

    /// Export all notes.
    ///
    /// # Errors
    ///
    /// Returns a validation error when there are no notes.
    pub fn export_notes(&self) -> Result<String> {
        transfer::export_collection(self.notes.records(), &self.note_stats(), self.now())
    }

    /// Export all projects.
    ///
    /// # Errors
    ///
    /// Returns a validation error when there are no projects.
    pub fn export_projects(&self) -> Result<String> {
        transfer::export_collection(self.projects.records(), &self.project_stats(), self.now())
    }

    /// Export the whole script library.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the library is empty.
    pub fn export_scripts(&self) -> Result<String> {
        transfer::export_collection(self.scripts.records(), &self.script_stats(), self.now())
    }

    /// Export one saved script.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn export_script(&self, id: RecordId) -> Result<Option<String>> {
        self.scripts.get(id).map(|script| transfer::export_script(script, self.now())).transpose()
    }

    /// Import tasks; returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns an import error for a malformed file (nothing is added), or a
    /// storage error if the write fails.
    pub fn import_tasks(&mut self, json: &str) -> Result<usize> {
        let now = self.now();
        import_into(&mut self.tasks, &self.store, json, now)
    }

    /// Import notes; returns how many were added.
    ///
    /// # Errors
    ///
    /// See [`App::import_tasks`].
    pub fn import_notes(&mut self, json: &str) -> Result<usize> {
        let now = self.now();
        import_into(&mut self.notes, &self.store, json, now)
    }

    /// Import projects; returns how many were added.
    ///
    /// # Errors
    ///
    /// See [`App::import_tasks`].
    pub fn import_projects(&mut self, json: &str) -> Result<usize> {
        let now = self.now();
        import_into(&mut self.projects, &self.store, json, now)
    }

    /// Import one or many scripts; returns how many were added.
    ///
    /// # Errors
    ///
    /// See [`App::import_tasks`].
    pub fn import_scripts(&mut self, json: &str) -> Result<usize> {
        let now = self.now();
        import_into(&mut self.scripts, &self.store, json, now)
    }

    /// Snapshot every collection and the settings.
    pub fn backup(&self) -> Backup {
        Backup {
            tasks: Some(self.tasks.records().to_vec()),
            notes: Some(self.notes.records().to_vec()),
            projects: Some(self.projects.records().to_vec()),
            scripts: Some(self.scripts.records().to_vec()),
            settings: Some(self.settings),
            export_date: Some(self.now()),
        }
    }

    /// Serialize a full backup.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if serialization fails.
    pub fn export_backup(&self) -> Result<String> {
        transfer::export_backup(&self.backup())
    }

    /// Replace every collection present in a backup file.
    ///
    /// The file is parsed completely first; a malformed file changes nothing.
    ///
    /// # Errors
    ///
    /// Returns an import error for a malformed file, or a storage error if a
    /// write fails.
    pub fn restore_backup(&mut self, json: &str) -> Result<RestoreSummary> {
        let backup = transfer::parse_backup(json, self.now())?;
        let summary = RestoreSummary { records: backup.record_count(), settings: backup.settings.is_some() };

        if let Some(tasks) = backup.tasks {
            replace_collection(&mut self.tasks, &self.store, tasks)?;
        }
        if let Some(notes) = backup.notes {
            replace_collection(&mut self.notes, &self.store, notes)?;
        }
        if let Some(projects) = backup.projects {
            replace_collection(&mut self.projects, &self.store, projects)?;
        }
        if let Some(scripts) = backup.scripts {
            replace_collection(&mut self.scripts, &self.store, scripts)?;
        }
        if let Some(settings) = backup.settings {
            self.settings = settings;
            save_value(&self.store, keys::SETTINGS, &self.settings)?;
        }
        log::info!(
            "event=backup_restore module=app status=ok records={} settings={}",
            summary.records,
            summary.settings
        );
        Ok(summary)
    }
}

fn delete_record<R: Record>(
    collection: &mut Collection<R>,
    store: &dyn KeyValueStore,
    id: RecordId,
    confirm: &dyn Confirm,
    prompt: &str,
) -> Result<bool> {
    if collection.get(id).is_none() {
        return Ok(false);
    }
    if !confirm.confirm(prompt) {
        log::info!("event=delete module=app status=declined collection={} id={}", R::COLLECTION, short_id(&id));
        return Ok(false);
    }
    collection.remove(id);
    collection.save(store)?;
    log::info!("event=delete module=app status=ok collection={} id={}", R::COLLECTION, short_id(&id));
    Ok(true)
}

fn import_into<R: Record>(
    collection: &mut Collection<R>,
    store: &dyn KeyValueStore,
    json: &str,
    now: DateTime<Utc>,
) -> Result<usize> {
    let records: Vec<R> = transfer::parse_import(json, now).map_err(|err| {
        log::warn!("event=import module=app status=error collection={} error={err}", R::COLLECTION);
        err
    })?;
    let count = records.len();
    collection.prepend_all(records);
    collection.save(store)?;
    log::info!("event=import module=app status=ok collection={} count={count}", R::COLLECTION);
    Ok(count)
}

fn replace_collection<R: Record>(collection: &mut Collection<R>, store: &dyn KeyValueStore, records: Vec<R>) -> Result<()> {
    collection.replace_all(records);
    collection.save(store)
}
