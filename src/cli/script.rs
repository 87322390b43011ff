//! Script CLI subcommands.
//!
//! The editor is a single autosaved buffer. `write`, `load` and `template`
//! replace it; `save` copies it into the library; `run` simulates it.

use clap::Subcommand;
use std::path::PathBuf;

/// Script editor and library commands.
#[derive(Subcommand, Debug, Clone)]
pub enum ScriptCommand {
    /// Show the editor buffer.
    Editor,

    /// Replace the editor buffer.
    Write {
        /// Read the code from this file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Code given inline
        #[arg(short, long, conflicts_with = "file")]
        code: Option<String>,

        /// Editor name
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Empty the editor buffer.
    Clear,

    /// Run the editor buffer, or a file.
    Run {
        /// Run this file instead of the editor buffer
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Save the editor buffer to the library.
    Save {
        /// Script name (defaults to the editor name)
        #[arg(short, long)]
        name: Option<String>,

        /// What the script does
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List saved scripts.
    List {
        /// Sort: newest, oldest, name
        #[arg(short, long, default_value = "newest")]
        sort: String,
    },

    /// Open a saved script in the editor.
    Load {
        /// Script ID or prefix
        id: String,
    },

    /// Change a saved script.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Edit {
        /// Script ID or prefix
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// Read the new code from this file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Delete a saved script.
    Delete {
        /// Script ID or prefix
        id: String,
    },

    /// List the built-in starter scripts.
    Templates,

    /// Open a starter script in the editor.
    Template {
        /// Position in `script templates`
        index: usize,
    },

    /// Print the library, or one script, as an export document.
    Export {
        /// Export only this script
        id: Option<String>,
    },

    /// Add one or many scripts from an export document.
    Import {
        /// Path to the JSON file
        file: PathBuf,
    },
}
