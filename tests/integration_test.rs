//! Integration tests for `deskmate`.

use deskmate::app::App;
use deskmate::models::{NoteCategory, NoteDraft, Priority, ProjectDraft, ProjectStatus, ScriptDraft, Theme};
use deskmate::query::{TaskSelector, TaskSort};
use deskmate::storage::SqliteStore;
use deskmate::testing::MockConfirm;
use deskmate::VERSION;
use tempfile::TempDir;

fn open(dir: &TempDir) -> App<SqliteStore> {
    let store = SqliteStore::with_path(dir.path().join("storage.sqlite3")).unwrap();
    App::load(store).unwrap()
}

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = open(&dir);
        let task = app.add_task("Steuererklärung", Priority::High).unwrap();
        app.toggle_task(task.id).unwrap();
        app.add_note(NoteDraft::new("Einkauf", "Milch, Brot", NoteCategory::Todo)).unwrap();
        app.add_project(ProjectDraft {
            name: "Umzug".to_string(),
            status: ProjectStatus::Active,
            ..ProjectDraft::default()
        })
        .unwrap();
        app.toggle_theme().unwrap();
        app.run_source("print('hi')").unwrap();
    }

    let app = open(&dir);
    assert_eq!(app.tasks().len(), 1);
    assert!(app.tasks()[0].completed);
    assert_eq!(app.notes()[0].title, "Einkauf");
    assert_eq!(app.projects()[0].status, ProjectStatus::Active);
    assert_eq!(app.settings().theme, Theme::Dark);
    assert_eq!(app.execution_count(), 1);
}

#[test]
fn test_saved_script_becomes_editor_buffer_after_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = open(&dir);
        app.save_script(ScriptDraft {
            name: "Begrüßung".to_string(),
            description: String::new(),
            source: "print('Hallo')".to_string(),
        })
        .unwrap();
    }

    let app = open(&dir);
    assert_eq!(app.scripts().len(), 1);
    let current = app.current_script().unwrap();
    assert_eq!(current.name, "Begrüßung");
    assert_eq!(current.code, "print('Hallo')");
}

#[test]
fn test_export_then_import_into_fresh_store() {
    let source_dir = TempDir::new().unwrap();
    let mut source = open(&source_dir);
    source.add_task("Erste", Priority::Low).unwrap();
    source.add_task("Zweite", Priority::High).unwrap();
    let exported = source.export_tasks().unwrap();

    let target_dir = TempDir::new().unwrap();
    let mut target = open(&target_dir);
    assert_eq!(target.import_tasks(&exported).unwrap(), 2);

    let by_priority: Vec<&str> =
        target.task_view(TaskSelector::All, TaskSort::Priority).iter().map(|t| t.text.as_str()).collect();
    assert_eq!(by_priority, vec!["Zweite", "Erste"]);

    // Imported records get fresh ids.
    let source_ids: Vec<_> = source.tasks().iter().map(|t| t.id).collect();
    assert!(target.tasks().iter().all(|t| !source_ids.contains(&t.id)));
}

#[test]
fn test_malformed_import_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut app = open(&dir);
    app.add_task("Bleibt", Priority::Medium).unwrap();

    assert!(app.import_tasks("{ not json").is_err());
    drop(app);

    let app = open(&dir);
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.tasks()[0].text, "Bleibt");
}

#[test]
fn test_backup_restore_replaces_collections() {
    let dir = TempDir::new().unwrap();
    let mut app = open(&dir);
    app.add_task("Aus dem Backup", Priority::Medium).unwrap();
    app.toggle_theme().unwrap();
    let backup = app.export_backup().unwrap();

    let other_dir = TempDir::new().unwrap();
    let mut other = open(&other_dir);
    other.add_task("Wird ersetzt", Priority::Low).unwrap();
    let summary = other.restore_backup(&backup).unwrap();
    assert_eq!(summary.records, 1);
    assert!(summary.settings);
    drop(other);

    let other = open(&other_dir);
    assert_eq!(other.tasks().len(), 1);
    assert_eq!(other.tasks()[0].text, "Aus dem Backup");
    assert_eq!(other.settings().theme, Theme::Dark);
}

#[test]
fn test_clear_all_keeps_scripts_and_settings() {
    let dir = TempDir::new().unwrap();
    {
        let mut app = open(&dir);
        app.add_task("Weg damit", Priority::Medium).unwrap();
        app.save_script(ScriptDraft {
            name: "Bleibt".to_string(),
            description: String::new(),
            source: "x = 1".to_string(),
        })
        .unwrap();
        app.toggle_theme().unwrap();

        assert!(!app.clear_all_data(&MockConfirm::reject()).unwrap());
        assert_eq!(app.tasks().len(), 1);
        assert!(app.clear_all_data(&MockConfirm::accept()).unwrap());
    }

    let app = open(&dir);
    assert!(app.tasks().is_empty());
    assert!(app.current_script().is_none());
    assert_eq!(app.scripts().len(), 1);
    assert_eq!(app.settings().theme, Theme::Dark);
}
