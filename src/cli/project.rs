//! Project CLI subcommands.

use clap::{Args, Subcommand};

/// Editable project fields shared by `add` and `edit`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectFields {
    /// Short description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Status: planning, active, completed, paused, cancelled
    #[arg(short, long)]
    pub status: Option<String>,

    /// Deadline as YYYY-MM-DD; an empty value removes it
    #[arg(long)]
    pub deadline: Option<String>,

    /// Priority: low, medium, high
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

/// Project commands.
#[derive(Subcommand, Debug, Clone)]
pub enum ProjectCommand {
    /// Add a project.
    Add {
        /// Project name
        name: String,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// List projects.
    List {
        /// Filter: all, a status, or overdue
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Sort: newest, oldest, name, status, priority, deadline
        #[arg(short, long, default_value = "newest")]
        sort: String,
    },

    /// Show one project with its notes.
    Show {
        /// Project ID or prefix
        id: String,
    },

    /// Change a project.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Edit {
        /// Project ID or prefix
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: ProjectFields,
    },

    /// Set only the status.
    Status {
        /// Project ID or prefix
        id: String,

        /// planning, active, completed, paused, cancelled
        status: String,
    },

    /// Copy a project as a new one in planning.
    Duplicate {
        /// Project ID or prefix
        id: String,
    },

    /// Delete a project.
    Delete {
        /// Project ID or prefix
        id: String,
    },

    /// Print all projects as an export document.
    Export,

    /// Add projects from an export document.
    Import {
        /// Path to the JSON file
        file: std::path::PathBuf,
    },
}
