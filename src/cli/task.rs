//! Task CLI subcommands.

use clap::Subcommand;

/// Task list commands.
///
/// Ids can be shortened to any unique prefix of at least four characters.
///
/// ```bash
/// deskmate task add "Steuererklärung abgeben" --priority high
/// deskmate task list --filter pending --sort priority
/// deskmate task toggle 3f2a
/// ```
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Add a task at the top of the list.
    Add {
        /// What needs doing
        text: String,

        /// Priority: low, medium, high
        #[arg(short, long, default_value = "medium")]
        priority: String,
    },

    /// List tasks.
    List {
        /// Filter: all, pending, completed, high
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Sort: newest, oldest, priority
        #[arg(short, long, default_value = "newest")]
        sort: String,
    },

    /// Flip a task between open and done.
    Toggle {
        /// Task ID or prefix
        id: String,
    },

    /// Change a task's text or priority.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Edit {
        /// Task ID or prefix
        id: String,

        /// New text
        #[arg(short, long)]
        text: Option<String>,

        /// New priority: low, medium, high
        #[arg(short, long)]
        priority: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID or prefix
        id: String,
    },

    /// Delete every completed task.
    #[command(name = "clear-completed")]
    ClearCompleted,

    /// Print all tasks as an export document.
    Export,

    /// Add tasks from an export document.
    Import {
        /// Path to the JSON file
        file: std::path::PathBuf,
    },
}
