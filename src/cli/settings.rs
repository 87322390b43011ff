//! Settings, profile and backup subcommands.

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// UI settings.
#[derive(Subcommand, Debug, Clone)]
pub enum SettingsCommand {
    /// Show the current settings.
    Show,

    /// Switch between light and dark theme.
    Theme,

    /// Set the base font size.
    #[command(name = "font-size")]
    FontSize {
        /// small, medium, large
        size: String,
    },
}

/// Profile fields; omitted fields keep their current value.
#[derive(Args, Debug, Clone, Default)]
pub struct ProfileFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,
    /// Job title or role
    #[arg(long)]
    pub title: Option<String>,
    /// Location
    #[arg(long)]
    pub location: Option<String>,
    /// Free-text self description
    #[arg(long)]
    pub about: Option<String>,
    /// Contact email
    #[arg(long)]
    pub email: Option<String>,
    /// GitHub profile URL
    #[arg(long)]
    pub github: Option<String>,
    /// LinkedIn profile URL
    #[arg(long)]
    pub linkedin: Option<String>,
    /// Portfolio URL
    #[arg(long)]
    pub portfolio: Option<String>,
}

/// Personal info profile.
#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommand {
    /// Show the profile.
    Show,

    /// Change profile fields. An empty value restores the placeholder.
    Edit {
        #[command(flatten)]
        fields: ProfileFields,
    },
}

/// Full backups.
#[derive(Subcommand, Debug, Clone)]
pub enum BackupCommand {
    /// Print a backup of every collection and the settings.
    Export,

    /// Replace data with the contents of a backup file.
    Restore {
        /// Path to the JSON file
        file: PathBuf,
    },
}
