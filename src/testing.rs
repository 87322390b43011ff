//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit and integration tests.

#![allow(dead_code)]

use crate::error::{Error, Result};
use crate::traits::{Confirm, KeyValueStore};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// An in-memory persistence gateway.
///
/// Writes can be switched to fail to simulate a full or disabled store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set`/`remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Snapshot of all stored keys.
    pub fn keys(&self) -> Vec<String> {
        self.values.borrow().keys().cloned().collect()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.get() {
            return Err(Error::Storage("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.values.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// A confirmation gate with a scripted answer that records every prompt.
#[derive(Debug)]
pub struct MockConfirm {
    answer: bool,
    prompts: RefCell<Vec<String>>,
}

impl MockConfirm {
    /// A gate that always accepts.
    #[must_use]
    pub fn accept() -> Self {
        Self { answer: true, prompts: RefCell::new(Vec::new()) }
    }

    /// A gate that always declines.
    #[must_use]
    pub fn reject() -> Self {
        Self { answer: false, prompts: RefCell::new(Vec::new()) }
    }

    /// Prompts shown so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }
}

impl Confirm for MockConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.answer
    }
}
