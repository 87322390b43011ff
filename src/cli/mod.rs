//! Hierarchical CLI for deskmate.
//!
//! Two-level commands for tasks, notes, projects, scripts, settings, the
//! profile and backups.

mod note;
mod project;
mod run;
mod script;
mod settings;
mod task;


pub use note::NoteCommand;
pub use project::{ProjectCommand, ProjectFields};
pub use run::{run, run_utility, CliOutput, RunOptions, TerminalConfirm};
pub use script::ScriptCommand;
pub use settings::{BackupCommand, ProfileCommand, ProfileFields, SettingsCommand};
pub use task::TaskCommand;

use clap::{Parser, Subcommand};

/// Deskmate - tasks, notes, projects and scripts in one local store.
///
/// For detailed help on any command group, use:
///   deskmate <command> --help
#[derive(Parser, Debug)]
#[command(name = "deskmate")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Print JSON instead of the text views
    #[arg(long, global = true)]
    pub json: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Task list - add, check off, prioritise and filter tasks.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Notes - categorised notes with search.
    #[command(subcommand)]
    Note(NoteCommand),

    /// Projects - status, deadlines and priorities.
    #[command(subcommand)]
    Project(ProjectCommand),

    /// Scripts - editor buffer, library, templates and the simulator.
    #[command(subcommand)]
    Script(ScriptCommand),

    /// Theme and font size.
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Personal info profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Full backup and restore.
    #[command(subcommand)]
    Backup(BackupCommand),

    /// Counters across every area.
    Stats,

    /// Delete all tasks, notes, projects and the editor buffer.
    ///
    /// Saved scripts, settings and the profile are kept.
    Clear,

    // === Utility Commands ===
    /// Show version information.
    Version,

    /// Ensure config file exists (create with defaults if not).
    #[command(name = "ensure-config")]
    EnsureConfig,
}

impl Command {
    /// Returns true if this command works without opening the store.
    #[must_use]
    pub const fn is_utility(&self) -> bool {
        matches!(self, Self::Version | Self::EnsureConfig)
    }
}
