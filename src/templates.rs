//! Template loading and rendering using Tera.
//!
//! Every screen the CLI prints is a template under `views/`. The defaults
//! are compiled in; a configured templates directory overrides any of them
//! by name.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;
use tera::{Context, Tera};

/// Task list.
pub const TASKS: &str = "views/tasks.tera";
/// Note list.
pub const NOTES: &str = "views/notes.tera";
/// Project list.
pub const PROJECTS: &str = "views/projects.tera";
/// Single project.
pub const PROJECT: &str = "views/project.tera";
/// Saved script list.
pub const SCRIPTS: &str = "views/scripts.tera";
/// Starter template gallery.
pub const SCRIPT_TEMPLATES: &str = "views/script_templates.tera";
/// Editor buffer.
pub const EDITOR: &str = "views/editor.tera";
/// Script run result.
pub const RUN_OUTPUT: &str = "views/run_output.tera";
/// Profile.
pub const PROFILE: &str = "views/profile.tera";
/// Settings.
pub const SETTINGS: &str = "views/settings.tera";
/// Counters overview.
pub const DASHBOARD: &str = "views/dashboard.tera";

/// Embedded default templates for fallback when files don't exist.
static EMBEDDED_TEMPLATES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(TASKS, include_str!("../templates/views/tasks.tera"));
    m.insert(NOTES, include_str!("../templates/views/notes.tera"));
    m.insert(PROJECTS, include_str!("../templates/views/projects.tera"));
    m.insert(PROJECT, include_str!("../templates/views/project.tera"));
    m.insert(SCRIPTS, include_str!("../templates/views/scripts.tera"));
    m.insert(SCRIPT_TEMPLATES, include_str!("../templates/views/script_templates.tera"));
    m.insert(EDITOR, include_str!("../templates/views/editor.tera"));
    m.insert(RUN_OUTPUT, include_str!("../templates/views/run_output.tera"));
    m.insert(PROFILE, include_str!("../templates/views/profile.tera"));
    m.insert(SETTINGS, include_str!("../templates/views/settings.tera"));
    m.insert(DASHBOARD, include_str!("../templates/views/dashboard.tera"));
    m
});

/// Global template engine with caching.
static TERA: Lazy<RwLock<Option<Tera>>> = Lazy::new(|| RwLock::new(None));

/// Initialize the template engine, loading overrides from `templates_dir`.
///
/// With `None`, or a directory that doesn't exist, only the embedded
/// defaults are used.
///
/// # Errors
///
/// Returns an error if the templates directory exists but contains invalid
/// templates, or an embedded template fails to parse.
pub fn init_templates(templates_dir: Option<&Path>) -> Result<()> {
    let mut tera = Tera::default();

    if let Some(dir) = templates_dir.filter(|dir| dir.exists()) {
        let glob_pattern = format!("{}/**/*.tera", dir.display());
        tera = Tera::new(&glob_pattern).map_err(|e| {
            Error::Template(format!("Failed to load templates from {}: {e}", dir.display()))
        })?;
        log::debug!(
            "event=templates_load module=templates dir={} count={}",
            dir.display(),
            tera.get_template_names().count()
        );
    }

    for (name, content) in EMBEDDED_TEMPLATES.iter() {
        if tera.get_template(name).is_err() {
            tera.add_raw_template(name, content)
                .map_err(|e| Error::Template(format!("Embedded template {name} is invalid: {e}")))?;
        }
    }

    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = Some(tera);

    Ok(())
}

/// Render a template with the given context.
///
/// Templates are lazy-loaded with embedded defaults on first use.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render(name: &str, context: &Context) -> Result<String> {
    let needs_init = TERA.read().map_err(|e| Error::Template(e.to_string()))?.is_none();

    if needs_init {
        init_templates(None)?;
    }

    let guard = TERA.read().map_err(|e| Error::Template(e.to_string()))?;
    let tera = guard.as_ref().ok_or_else(|| Error::Template("Templates not initialized".into()))?;
    let rendered = tera
        .render(name, context)
        .map_err(|e| Error::Template(format!("Failed to render template {name}: {e}")))?;
    drop(guard);

    Ok(rendered)
}

/// Render a template whose context is a serializable view model.
///
/// # Errors
///
/// Returns an error if `view` does not serialize to a JSON object or
/// rendering fails.
pub fn render_view<T: Serialize>(name: &str, view: &T) -> Result<String> {
    let ctx = Context::from_serialize(view)
        .map_err(|e| Error::Template(format!("Invalid context for {name}: {e}")))?;
    render(name, &ctx)
}

/// Render a template with a simple key-value context.
///
/// # Errors
///
/// Returns an error if the template doesn't exist or rendering fails.
pub fn render_with_vars(name: &str, vars: &[(&str, &str)]) -> Result<String> {
    let mut context = Context::new();
    for (key, value) in vars {
        context.insert(*key, value);
    }
    render(name, &context)
}

/// Reset the template cache, forcing re-initialization on next use.
///
/// # Errors
///
/// Returns an error if the write lock cannot be acquired.
pub fn reset_cache() -> Result<()> {
    *TERA.write().map_err(|e| Error::Template(e.to_string()))? = None;
    Ok(())
}

/// Get the list of all embedded template names.
#[must_use]
pub fn embedded_template_names() -> Vec<&'static str> {
    EMBEDDED_TEMPLATES.keys().copied().collect()
}

/// Verify all embedded templates render with sample data.
///
/// # Errors
///
/// Returns an error if any template fails to render.
pub fn verify_all_templates() -> Result<()> {
    reset_cache()?;
    init_templates(None)?;

    for name in embedded_template_names() {
        let ctx = sample_context_for(name)?;
        render(name, &ctx)
            .map_err(|e| Error::Template(format!("Template {name} failed to render: {e}")))?;
    }

    Ok(())
}

/// Build a realistic context for a template from sample records.
fn sample_context_for(template_name: &str) -> Result<Context> {
    use crate::models::{
        CurrentScript, Note, NoteCategory, NoteDraft, PersonalInfo, Priority, Project, ProjectDraft, ProjectStatus,
        SavedScript, ScriptDraft, Settings, Task,
    };
    use crate::present::{self, Dashboard, Presenter};
    use crate::query::{self, NoteQuery, ProjectSelector, TaskSelector};
    use crate::script_runner::TEMPLATES;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    let now = Utc.with_ymd_and_hms(2026, 10, 16, 14, 5, 0).single().unwrap_or_default();
    let today = now.date_naive();
    let presenter = Presenter::utc();

    let mut task = Task::new(Uuid::from_u128(1), "Steuererklärung abgeben", Priority::High, now);
    task.set_completed(true, now);
    let tasks = vec![task, Task::new(Uuid::from_u128(2), "Milch kaufen", Priority::Low, now)];
    let notes = vec![Note::from_draft(
        Uuid::from_u128(3),
        NoteDraft::new("Ideen", "Ein Buch über Rust schreiben", NoteCategory::Ideas),
        now,
    )];
    let projects = vec![Project::from_draft(
        Uuid::from_u128(4),
        ProjectDraft {
            name: "Umzug".into(),
            status: ProjectStatus::Active,
            description: "Neue Wohnung".into(),
            deadline: today.pred_opt(),
            priority: Priority::High,
            notes: "Kisten besorgen".into(),
        },
        now,
    )];
    let scripts = vec![SavedScript::from_draft(
        Uuid::from_u128(5),
        ScriptDraft { name: "Hallo".into(), description: "Gruß".into(), source: "print(\"Hallo\")".into() },
        now,
    )];

    match template_name {
        TASKS => {
            let rows: Vec<&Task> = tasks.iter().collect();
            context(&presenter.task_page(&rows, query::stats::task_stats(&tasks), TaskSelector::All, "newest"))
        }
        NOTES => {
            let rows: Vec<&Note> = notes.iter().collect();
            let query = NoteQuery::parse("all", "rust", "newest");
            context(&presenter.note_page(&rows, query::stats::note_stats(&notes, now), &query))
        }
        PROJECTS => {
            let rows: Vec<&Project> = projects.iter().collect();
            let stats = query::stats::project_stats(&projects, now);
            context(&presenter.project_page(&rows, stats, ProjectSelector::All, "newest", now))
        }
        PROJECT => context(&presenter.project_detail(&projects[0], now)),
        SCRIPTS => {
            let rows: Vec<&SavedScript> = scripts.iter().collect();
            context(&presenter.script_page(&rows, query::stats::script_stats(&scripts), "newest"))
        }
        SCRIPT_TEMPLATES => {
            let mut ctx = Context::new();
            ctx.insert("templates", &present::template_rows(&TEMPLATES));
            Ok(ctx)
        }
        EDITOR => context(&presenter.editor(Some(&CurrentScript::new("demo", "print(1)", now)))),
        PROFILE => context(&present::profile_view(&PersonalInfo::default())),
        SETTINGS => context(&present::settings_view(Settings::default())),
        DASHBOARD => context(&Dashboard {
            tasks: query::stats::task_stats(&tasks),
            notes: query::stats::note_stats(&notes, now),
            projects: query::stats::project_stats(&projects, now),
            scripts: query::stats::script_stats(&scripts),
            executions: 3,
        }),
        _ => {
            let mut ctx = Context::new();
            ctx.insert("output", "Hallo\n\n--- Ausführung beendet ---");
            ctx.insert("executions", "3");
            Ok(ctx)
        }
    }
}

fn context<T: Serialize>(view: &T) -> Result<Context> {
    Context::from_serialize(view).map_err(|e| Error::Template(e.to_string()))
}
