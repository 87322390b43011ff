//! Command execution for the CLI.
//!
//! This module handles running CLI commands against a loaded [`App`] and
//! producing output.

use crate::app::App;
use crate::cli::{
    BackupCommand, Command, NoteCommand, ProfileCommand, ProfileFields, ProjectCommand, ProjectFields,
    ScriptCommand, SettingsCommand, TaskCommand,
};
use crate::config::{self, AppConfig};
use crate::error::{Error, Result};
use crate::id::short_id;
use crate::models::{
    FontSize, NoteCategory, NoteDraft, Priority, ProjectDraft, ProjectStatus, ScriptDraft,
};
use crate::present::{self, Dashboard, Presenter};
use crate::query::{NoteQuery, ProjectSelector, ProjectSort, ScriptSort, TaskSelector, TaskSort};
use crate::script_runner::TEMPLATES;
use crate::templates;
use crate::traits::{Confirm, KeyValueStore};
use chrono::NaiveDate;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Everything a command needs besides the application state.
pub struct RunOptions<'a> {
    /// Gate for destructive commands.
    pub confirm: &'a dyn Confirm,
    /// Date formatting and labels for the text views.
    pub presenter: Presenter,
    /// Print JSON instead of the text views.
    pub json: bool,
    /// Data directory holding the config file.
    pub data_dir: PathBuf,
}

/// Interactive y/N confirmation on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl TerminalConfirm {
    fn accepts(answer: &str) -> bool {
        matches!(answer.trim().to_lowercase().as_str(), "j" | "ja" | "y" | "yes")
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [j/N] ");
        io::stderr().flush().ok();
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => Self::accepts(&answer),
            Err(_) => false,
        }
    }
}

/// Run a command that doesn't need the store; `None` for every other command.
pub fn run_utility(command: &Command, data_dir: &Path) -> Option<CliOutput> {
    match command {
        Command::Version => Some(run_version()),
        Command::EnsureConfig => Some(run_ensure_config(data_dir)),
        _ => None,
    }
}

/// Run a CLI command against the loaded application state.
pub fn run<S: KeyValueStore>(command: Command, app: &mut App<S>, options: &RunOptions<'_>) -> CliOutput {
    let result = match command {
        Command::Version => return run_version(),
        Command::EnsureConfig => return run_ensure_config(&options.data_dir),
        Command::Task(cmd) => run_task_cmd(app, cmd, options),
        Command::Note(cmd) => run_note_cmd(app, cmd, options),
        Command::Project(cmd) => run_project_cmd(app, cmd, options),
        Command::Script(cmd) => run_script_cmd(app, cmd, options),
        Command::Settings(cmd) => run_settings_cmd(app, &cmd, options),
        Command::Profile(cmd) => run_profile_cmd(app, cmd, options),
        Command::Backup(cmd) => run_backup_cmd(app, cmd),
        Command::Stats => run_stats(app, options),
        Command::Clear => run_clear(app, options),
    };

    result.unwrap_or_else(|e| {
        log::warn!("event=cli_command module=cli status=error validation={}", e.is_validation());
        error_output(e.to_string())
    })
}

// === Utility Commands ===

fn run_version() -> CliOutput {
    CliOutput {
        exit_code: ExitCode::SUCCESS,
        stdout: vec![],
        stderr: vec![format!("deskmate v{}", crate::VERSION)],
    }
}

fn run_ensure_config(data_dir: &Path) -> CliOutput {
    match config::ensure_config_in(data_dir) {
        Ok((config, created)) => {
            let verb = if created { "Created" } else { "Config ensured at" };
            let mut messages = vec![format!("{verb} {}", AppConfig::config_path(data_dir).display())];
            messages.push(format!("  log_level: {}", config.log_level));
            messages.push(format!("  file_logging: {}", config.file_logging));
            if let Some(ref dir) = config.templates_dir {
                messages.push(format!("  templates_dir: {}", dir.display()));
            } else {
                messages.push("  templates_dir: (embedded)".to_string());
            }
            CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: messages }
        }
        Err(e) => error_output(format!("Error ensuring config: {e}")),
    }
}

// === Tasks ===

fn run_task_cmd<S: KeyValueStore>(app: &mut App<S>, cmd: TaskCommand, options: &RunOptions<'_>) -> Result<CliOutput> {
    match cmd {
        TaskCommand::Add { text, priority } => {
            let task = app.add_task(&text, Priority::from_str(&priority)?)?;
            if options.json {
                return Ok(json_output(&task));
            }
            Ok(success_output(format!("Aufgabe hinzugefügt: {}  {}", short_id(&task.id), task.text)))
        }
        TaskCommand::List { filter, sort } => {
            let selector = TaskSelector::parse(&filter);
            let sort = TaskSort::parse(&sort);
            let tasks = app.task_view(selector, sort);
            let stats = app.task_stats();
            if options.json {
                return Ok(json_output(&ListOutput { items: tasks, stats }));
            }
            let page = options.presenter.task_page(&tasks, stats, selector, sort.as_str());
            view_output(templates::TASKS, &page)
        }
        TaskCommand::Toggle { id: prefix } => {
            let Some(id) = app.resolve_task(&prefix) else {
                return Ok(not_found("Aufgabe", &prefix));
            };
            let Some(task) = app.toggle_task(id)? else {
                return Ok(not_found("Aufgabe", &prefix));
            };
            if options.json {
                return Ok(json_output(&task));
            }
            let state = if task.completed { "Erledigt" } else { "Wieder offen" };
            Ok(success_output(format!("{state}: {}", task.text)))
        }
        TaskCommand::Edit { id: prefix, text, priority } => {
            let Some(current) = app.resolve_task(&prefix).and_then(|id| app.tasks().iter().find(|t| t.id == id))
            else {
                return Ok(not_found("Aufgabe", &prefix));
            };
            let id = current.id;
            let text = text.unwrap_or_else(|| current.text.clone());
            let priority = priority.map_or(Ok(current.priority), |p| Priority::from_str(&p))?;
            let Some(task) = app.edit_task(id, &text, priority)? else {
                return Ok(not_found("Aufgabe", &prefix));
            };
            if options.json {
                return Ok(json_output(&task));
            }
            Ok(success_output(format!("Aufgabe aktualisiert: {}  {}", short_id(&task.id), task.text)))
        }
        TaskCommand::Delete { id: prefix } => {
            let Some(id) = app.resolve_task(&prefix) else {
                return Ok(not_found("Aufgabe", &prefix));
            };
            if app.delete_task(id, options.confirm)? {
                Ok(success_output("Aufgabe gelöscht.".to_string()))
            } else {
                Ok(cancelled())
            }
        }
        TaskCommand::ClearCompleted => {
            if app.tasks().iter().all(|t| !t.completed) {
                return Ok(success_output("Keine erledigten Aufgaben vorhanden.".to_string()));
            }
            match app.clear_completed_tasks(options.confirm)? {
                0 => Ok(cancelled()),
                removed => Ok(success_output(format!("{removed} erledigte Aufgaben gelöscht."))),
            }
        }
        TaskCommand::Export => Ok(success_output(app.export_tasks()?)),
        TaskCommand::Import { file } => {
            let added = app.import_tasks(&std::fs::read_to_string(file)?)?;
            Ok(success_output(format!("{added} Aufgaben importiert.")))
        }
    }
}

// === Notes ===

fn run_note_cmd<S: KeyValueStore>(app: &mut App<S>, cmd: NoteCommand, options: &RunOptions<'_>) -> Result<CliOutput> {
    match cmd {
        NoteCommand::Add { title, content, category } => {
            let note = app.add_note(NoteDraft::new(title, content, NoteCategory::from_str(&category)?))?;
            if options.json {
                return Ok(json_output(&note));
            }
            Ok(success_output(format!("Notiz gespeichert: {}  {}", short_id(&note.id), note.title)))
        }
        NoteCommand::List { filter, search, sort } => {
            let query = NoteQuery::parse(&filter, &search, &sort);
            let notes = app.note_view(&query);
            let stats = app.note_stats();
            if options.json {
                return Ok(json_output(&ListOutput { items: notes, stats }));
            }
            let page = options.presenter.note_page(&notes, stats, &query);
            view_output(templates::NOTES, &page)
        }
        NoteCommand::Show { id: prefix } => {
            let Some(note) = app.resolve_note(&prefix).and_then(|id| app.notes().iter().find(|n| n.id == id)) else {
                return Ok(not_found("Notiz", &prefix));
            };
            if options.json {
                return Ok(json_output(note));
            }
            let row = options.presenter.note_row(note);
            let mut text = format!("{}\n[{}] Erstellt: {}", note.title, row.category_label, row.created);
            if let Some(edited) = row.edited {
                text.push_str(&format!(" | Bearbeitet: {edited}"));
            }
            if !note.content.is_empty() {
                text.push_str("\n\n");
                text.push_str(&note.content);
            }
            Ok(success_output(text))
        }
        NoteCommand::Edit { id: prefix, title, content, category } => {
            let Some(current) = app.resolve_note(&prefix).and_then(|id| app.notes().iter().find(|n| n.id == id))
            else {
                return Ok(not_found("Notiz", &prefix));
            };
            let id = current.id;
            let category = category.map_or(Ok(current.category), |c| NoteCategory::from_str(&c))?;
            let draft = NoteDraft::new(
                title.unwrap_or_else(|| current.title.clone()),
                content.unwrap_or_else(|| current.content.clone()),
                category,
            );
            let Some(note) = app.edit_note(id, draft)? else {
                return Ok(not_found("Notiz", &prefix));
            };
            if options.json {
                return Ok(json_output(&note));
            }
            Ok(success_output(format!("Notiz aktualisiert: {}  {}", short_id(&note.id), note.title)))
        }
        NoteCommand::Delete { id: prefix } => {
            let Some(id) = app.resolve_note(&prefix) else {
                return Ok(not_found("Notiz", &prefix));
            };
            if app.delete_note(id, options.confirm)? {
                Ok(success_output("Notiz gelöscht.".to_string()))
            } else {
                Ok(cancelled())
            }
        }
        NoteCommand::Export => Ok(success_output(app.export_notes()?)),
        NoteCommand::Import { file } => {
            let added = app.import_notes(&std::fs::read_to_string(file)?)?;
            Ok(success_output(format!("{added} Notizen importiert.")))
        }
    }
}

// === Projects ===

/// `YYYY-MM-DD`; blank means no deadline.
fn parse_deadline(raw: &str) -> Result<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| Error::validation(format!("Ungültiges Datum: {raw} (erwartet JJJJ-MM-TT)")))
}

/// Overlay the given fields on `draft`.
fn apply_project_fields(mut draft: ProjectDraft, fields: ProjectFields) -> Result<ProjectDraft> {
    if let Some(description) = fields.description {
        draft.description = description;
    }
    if let Some(status) = fields.status {
        draft.status = ProjectStatus::from_str(&status)?;
    }
    if let Some(deadline) = fields.deadline {
        draft.deadline = parse_deadline(&deadline)?;
    }
    if let Some(priority) = fields.priority {
        draft.priority = Priority::from_str(&priority)?;
    }
    if let Some(notes) = fields.notes {
        draft.notes = notes;
    }
    Ok(draft)
}

fn run_project_cmd<S: KeyValueStore>(
    app: &mut App<S>,
    cmd: ProjectCommand,
    options: &RunOptions<'_>,
) -> Result<CliOutput> {
    match cmd {
        ProjectCommand::Add { name, fields } => {
            let draft = apply_project_fields(ProjectDraft { name, ..ProjectDraft::default() }, fields)?;
            let project = app.add_project(draft)?;
            if options.json {
                return Ok(json_output(&project));
            }
            Ok(success_output(format!("Projekt angelegt: {}  {}", short_id(&project.id), project.name)))
        }
        ProjectCommand::List { filter, sort } => {
            let selector = ProjectSelector::parse(&filter);
            let sort = ProjectSort::parse(&sort);
            let now = app.now();
            let projects = app.project_view(selector, sort);
            let stats = app.project_stats();
            if options.json {
                return Ok(json_output(&ListOutput { items: projects, stats }));
            }
            let page = options.presenter.project_page(&projects, stats, selector, sort.as_str(), now);
            view_output(templates::PROJECTS, &page)
        }
        ProjectCommand::Show { id: prefix } => {
            let now = app.now();
            let Some(project) =
                app.resolve_project(&prefix).and_then(|id| app.projects().iter().find(|p| p.id == id))
            else {
                return Ok(not_found("Projekt", &prefix));
            };
            if options.json {
                return Ok(json_output(project));
            }
            view_output(templates::PROJECT, &options.presenter.project_detail(project, now))
        }
        ProjectCommand::Edit { id: prefix, name, fields } => {
            let Some(current) =
                app.resolve_project(&prefix).and_then(|id| app.projects().iter().find(|p| p.id == id))
            else {
                return Ok(not_found("Projekt", &prefix));
            };
            let id = current.id;
            let mut draft = apply_project_fields(current.to_draft(), fields)?;
            if let Some(name) = name {
                draft.name = name;
            }
            let Some(project) = app.edit_project(id, draft)? else {
                return Ok(not_found("Projekt", &prefix));
            };
            if options.json {
                return Ok(json_output(&project));
            }
            Ok(success_output(format!("Projekt aktualisiert: {}  {}", short_id(&project.id), project.name)))
        }
        ProjectCommand::Status { id: prefix, status } => {
            let status = ProjectStatus::from_str(&status)?;
            let Some(id) = app.resolve_project(&prefix) else {
                return Ok(not_found("Projekt", &prefix));
            };
            let Some(project) = app.set_project_status(id, status)? else {
                return Ok(not_found("Projekt", &prefix));
            };
            if options.json {
                return Ok(json_output(&project));
            }
            Ok(success_output(format!("{}: {}", project.name, present::status_label(project.status))))
        }
        ProjectCommand::Duplicate { id: prefix } => {
            let Some(id) = app.resolve_project(&prefix) else {
                return Ok(not_found("Projekt", &prefix));
            };
            let Some(copy) = app.duplicate_project(id)? else {
                return Ok(not_found("Projekt", &prefix));
            };
            if options.json {
                return Ok(json_output(&copy));
            }
            Ok(success_output(format!("Projekt angelegt: {}  {}", short_id(&copy.id), copy.name)))
        }
        ProjectCommand::Delete { id: prefix } => {
            let Some(id) = app.resolve_project(&prefix) else {
                return Ok(not_found("Projekt", &prefix));
            };
            if app.delete_project(id, options.confirm)? {
                Ok(success_output("Projekt gelöscht.".to_string()))
            } else {
                Ok(cancelled())
            }
        }
        ProjectCommand::Export => Ok(success_output(app.export_projects()?)),
        ProjectCommand::Import { file } => {
            let added = app.import_projects(&std::fs::read_to_string(file)?)?;
            Ok(success_output(format!("{added} Projekte importiert.")))
        }
    }
}

// === Scripts ===

fn run_script_cmd<S: KeyValueStore>(
    app: &mut App<S>,
    cmd: ScriptCommand,
    options: &RunOptions<'_>,
) -> Result<CliOutput> {
    match cmd {
        ScriptCommand::Editor => {
            if options.json {
                return Ok(json_output(&app.current_script()));
            }
            view_output(templates::EDITOR, &options.presenter.editor(app.current_script()))
        }
        ScriptCommand::Write { file, code, name } => {
            let code = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => code.unwrap_or_default(),
            };
            let scratch = app.set_current_script(&name, &code)?;
            if options.json {
                return Ok(json_output(&scratch));
            }
            view_output(templates::EDITOR, &options.presenter.editor(Some(&scratch)))
        }
        ScriptCommand::Clear => {
            if app.clear_current_script(options.confirm)? {
                Ok(success_output("Editor geleert.".to_string()))
            } else {
                Ok(cancelled())
            }
        }
        ScriptCommand::Run { file } => {
            let output = match file {
                Some(path) => app.run_source(&std::fs::read_to_string(path)?)?,
                None => app.run_current_script()?,
            };
            let executions = app.execution_count();
            if options.json {
                return Ok(json_output(&serde_json::json!({ "output": output, "executions": executions })));
            }
            let rendered = templates::render_with_vars(
                templates::RUN_OUTPUT,
                &[("output", output.as_str()), ("executions", executions.to_string().as_str())],
            )?;
            Ok(success_output(rendered))
        }
        ScriptCommand::Save { name, description } => {
            let (editor_name, source) = app
                .current_script()
                .map(|s| (s.display_name().to_string(), s.code.clone()))
                .unwrap_or_default();
            let name = name.unwrap_or(editor_name);
            let script = app.save_script(ScriptDraft { name, description, source })?;
            if options.json {
                return Ok(json_output(&script));
            }
            Ok(success_output(format!("Script gespeichert: {}  {}", short_id(&script.id), script.name)))
        }
        ScriptCommand::List { sort } => {
            let sort = ScriptSort::parse(&sort);
            let scripts = app.script_view(sort);
            let stats = app.script_stats();
            if options.json {
                return Ok(json_output(&ListOutput { items: scripts, stats }));
            }
            let page = options.presenter.script_page(&scripts, stats, sort.as_str());
            view_output(templates::SCRIPTS, &page)
        }
        ScriptCommand::Load { id: prefix } => {
            let Some(id) = app.resolve_script(&prefix) else {
                return Ok(not_found("Script", &prefix));
            };
            let Some(scratch) = app.load_script(id)? else {
                return Ok(not_found("Script", &prefix));
            };
            if options.json {
                return Ok(json_output(&scratch));
            }
            Ok(success_output(format!("Script geladen: {}", scratch.name)))
        }
        ScriptCommand::Edit { id: prefix, name, description, file } => {
            let Some(current) =
                app.resolve_script(&prefix).and_then(|id| app.scripts().iter().find(|s| s.id == id))
            else {
                return Ok(not_found("Script", &prefix));
            };
            let id = current.id;
            let source = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => current.source.clone(),
            };
            let draft = ScriptDraft {
                name: name.unwrap_or_else(|| current.name.clone()),
                description: description.unwrap_or_else(|| current.description.clone()),
                source,
            };
            let Some(script) = app.edit_script(id, draft)? else {
                return Ok(not_found("Script", &prefix));
            };
            if options.json {
                return Ok(json_output(&script));
            }
            Ok(success_output(format!("Script aktualisiert: {}  {}", short_id(&script.id), script.name)))
        }
        ScriptCommand::Delete { id: prefix } => {
            let Some(id) = app.resolve_script(&prefix) else {
                return Ok(not_found("Script", &prefix));
            };
            if app.delete_script(id, options.confirm)? {
                Ok(success_output("Script gelöscht.".to_string()))
            } else {
                Ok(cancelled())
            }
        }
        ScriptCommand::Templates => {
            let rows = present::template_rows(&TEMPLATES);
            if options.json {
                return Ok(json_output(&rows));
            }
            view_output(templates::SCRIPT_TEMPLATES, &serde_json::json!({ "templates": rows }))
        }
        ScriptCommand::Template { index } => {
            let Some(scratch) = app.load_template(index)? else {
                return Ok(error_output(format!("Keine Vorlage mit Nummer {index}")));
            };
            if options.json {
                return Ok(json_output(&scratch));
            }
            Ok(success_output(format!("Vorlage geladen: {}", scratch.name)))
        }
        ScriptCommand::Export { id: None } => Ok(success_output(app.export_scripts()?)),
        ScriptCommand::Export { id: Some(prefix) } => {
            let Some(id) = app.resolve_script(&prefix) else {
                return Ok(not_found("Script", &prefix));
            };
            match app.export_script(id)? {
                Some(json) => Ok(success_output(json)),
                None => Ok(not_found("Script", &prefix)),
            }
        }
        ScriptCommand::Import { file } => {
            let added = app.import_scripts(&std::fs::read_to_string(file)?)?;
            Ok(success_output(format!("{added} Scripts importiert.")))
        }
    }
}

// === Settings, profile, backup ===

fn run_settings_cmd<S: KeyValueStore>(
    app: &mut App<S>,
    cmd: &SettingsCommand,
    options: &RunOptions<'_>,
) -> Result<CliOutput> {
    match cmd {
        SettingsCommand::Show => {}
        SettingsCommand::Theme => {
            app.toggle_theme()?;
        }
        SettingsCommand::FontSize { size } => app.set_font_size(FontSize::from_str(size)?)?,
    }
    if options.json {
        return Ok(json_output(&app.settings()));
    }
    view_output(templates::SETTINGS, &present::settings_view(app.settings()))
}

fn run_profile_cmd<S: KeyValueStore>(
    app: &mut App<S>,
    cmd: ProfileCommand,
    options: &RunOptions<'_>,
) -> Result<CliOutput> {
    if let ProfileCommand::Edit { fields } = cmd {
        let mut draft = app.profile().editable();
        let ProfileFields { name, title, location, about, email, github, linkedin, portfolio } = fields;
        for (slot, value) in [
            (&mut draft.name, name),
            (&mut draft.title, title),
            (&mut draft.location, location),
            (&mut draft.about, about),
            (&mut draft.email, email),
            (&mut draft.github, github),
            (&mut draft.linkedin, linkedin),
            (&mut draft.portfolio, portfolio),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }
        app.save_profile(&draft)?;
    }
    if options.json {
        return Ok(json_output(app.profile()));
    }
    view_output(templates::PROFILE, &present::profile_view(app.profile()))
}

fn run_backup_cmd<S: KeyValueStore>(app: &mut App<S>, cmd: BackupCommand) -> Result<CliOutput> {
    match cmd {
        BackupCommand::Export => Ok(success_output(app.export_backup()?)),
        BackupCommand::Restore { file } => {
            let summary = app.restore_backup(&std::fs::read_to_string(file)?)?;
            let mut message = format!("Backup wiederhergestellt: {} Einträge", summary.records);
            if summary.settings {
                message.push_str(" und Einstellungen");
            }
            message.push('.');
            Ok(success_output(message))
        }
    }
}

fn run_stats<S: KeyValueStore>(app: &App<S>, options: &RunOptions<'_>) -> Result<CliOutput> {
    let dashboard = Dashboard {
        tasks: app.task_stats(),
        notes: app.note_stats(),
        projects: app.project_stats(),
        scripts: app.script_stats(),
        executions: app.execution_count(),
    };
    if options.json {
        return Ok(json_output(&dashboard));
    }
    view_output(templates::DASHBOARD, &dashboard)
}

fn run_clear<S: KeyValueStore>(app: &mut App<S>, options: &RunOptions<'_>) -> Result<CliOutput> {
    if app.clear_all_data(options.confirm)? {
        Ok(success_output("Alle Daten wurden gelöscht.".to_string()))
    } else {
        Ok(cancelled())
    }
}

// === Helper Functions ===

fn view_output<T: Serialize>(template: &str, view: &T) -> Result<CliOutput> {
    Ok(success_output(templates::render_view(template, view)?.trim_end().to_string()))
}

fn json_output<T: Serialize + ?Sized>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn success_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![message], stderr: vec![] }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}

fn not_found(kind: &str, prefix: &str) -> CliOutput {
    error_output(format!("{kind} nicht gefunden: {prefix}"))
}

fn cancelled() -> CliOutput {
    CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![], stderr: vec!["Abgebrochen.".to_string()] }
}

// === Output Types ===

/// Visible records plus the summary counts of the whole collection.
#[derive(Debug, Serialize)]
struct ListOutput<'a, R, S> {
    items: Vec<&'a R>,
    stats: S,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_confirm_answers() {
        assert!(TerminalConfirm::accepts("j\n"));
        assert!(TerminalConfirm::accepts(" Ja "));
        assert!(TerminalConfirm::accepts("yes"));
        assert!(!TerminalConfirm::accepts(""));
        assert!(!TerminalConfirm::accepts("n"));
        assert!(!TerminalConfirm::accepts("jein"));
    }

    #[test]
    fn test_parse_deadline() {
        assert_eq!(parse_deadline("  ").unwrap(), None);
        assert_eq!(parse_deadline("2026-10-31").unwrap(), NaiveDate::from_ymd_opt(2026, 10, 31));
        let err = parse_deadline("31.10.2026").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_apply_project_fields_keeps_unset_fields() {
        let base = ProjectDraft { name: "Umzug".into(), notes: "Kisten".into(), ..ProjectDraft::default() };
        let fields = ProjectFields { status: Some("active".into()), deadline: Some(String::new()), ..Default::default() };
        let draft = apply_project_fields(base, fields).unwrap();
        assert_eq!(draft.status, ProjectStatus::Active);
        assert_eq!(draft.deadline, None);
        assert_eq!(draft.notes, "Kisten");
        assert_eq!(draft.name, "Umzug");
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let fields = ProjectFields { status: Some("done".into()), ..Default::default() };
        assert!(apply_project_fields(ProjectDraft::default(), fields).is_err());
    }
}
