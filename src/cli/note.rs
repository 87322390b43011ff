//! Note CLI subcommands.

use clap::Subcommand;

/// Note commands.
#[derive(Subcommand, Debug, Clone)]
pub enum NoteCommand {
    /// Add a note.
    Add {
        /// Title (required)
        #[arg(short, long, default_value = "")]
        title: String,

        /// Body text
        #[arg(short, long, default_value = "")]
        content: String,

        /// Category: personal, work, ideas, todo, other
        #[arg(short = 'k', long, default_value = "personal")]
        category: String,
    },

    /// List notes.
    ///
    /// The category filter and the search are applied together.
    List {
        /// Filter: all or a category
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Case-insensitive search over title and content
        #[arg(short = 'q', long, default_value = "")]
        search: String,

        /// Sort: newest, oldest, title, category
        #[arg(short, long, default_value = "newest")]
        sort: String,
    },

    /// Show one note in full.
    Show {
        /// Note ID or prefix
        id: String,
    },

    /// Change a note.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Edit {
        /// Note ID or prefix
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New body text
        #[arg(short, long)]
        content: Option<String>,

        /// New category
        #[arg(short = 'k', long)]
        category: Option<String>,
    },

    /// Delete a note.
    Delete {
        /// Note ID or prefix
        id: String,
    },

    /// Print all notes as an export document.
    Export,

    /// Add notes from an export document.
    Import {
        /// Path to the JSON file
        file: std::path::PathBuf,
    },
}
