//! Error types for `deskmate`.

/// Errors that can occur while loading, mutating or presenting data.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(String),

    /// User input failed validation; nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// An import document was unparseable or had the wrong shape; nothing was imported.
    #[error("Import failed: {0}")]
    Import(String),

    /// The persistence gateway rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a malformed import.
    pub fn import(message: impl Into<String>) -> Self {
        Self::Import(message.into())
    }

    /// Whether this error is a user-facing validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
