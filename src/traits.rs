//! Core traits for testability and abstraction.

use crate::error::Result;

/// Persistence gateway: a namespaced key to JSON-string store.
///
/// Operations are synchronous and non-transactional. Writes are full-value
/// overwrites, so a collection is always written as one blob.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is rejected (quota, read-only, I/O).
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Confirmation gate for destructive operations.
///
/// There is no undo, so deleting records or clearing data must ask first.
pub trait Confirm {
    /// Ask the user to confirm; `true` means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// A confirmation gate that always proceeds (`--yes`).
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
