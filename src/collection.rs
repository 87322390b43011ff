//! In-memory record collections mirrored to the persistence gateway.
//!
//! # Invariants
//! - New records are prepended, so stored order is newest first.
//! - Ids are unique within a collection.
//! - Persisting always writes the whole collection as one JSON array.

use crate::error::Result;
use crate::id::{resolve_prefix, RecordId};
use crate::models::{Note, Project, SavedScript, Task};
use crate::storage::keys;
use crate::traits::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record kind that lives in its own collection.
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Gateway key the collection is stored under.
    const STORAGE_KEY: &'static str;
    /// Collection name used in export documents.
    const COLLECTION: &'static str;
    /// Wrapper key for a single-record export, for kinds that have one.
    const ITEM_KEY: Option<&'static str> = None;

    /// Unique id.
    fn id(&self) -> RecordId;

    /// Restore cross-field invariants on a record that came from outside
    /// the domain operations (storage, import, backup).
    fn normalize(&mut self) {}
}

macro_rules! impl_record {
    ($ty:ty, $key:expr, $name:literal) => {
        impl_record!($ty, $key, $name, None);
    };
    ($ty:ty, $key:expr, $name:literal, $item:expr) => {
        impl Record for $ty {
            const STORAGE_KEY: &'static str = $key;
            const COLLECTION: &'static str = $name;
            const ITEM_KEY: Option<&'static str> = $item;

            fn id(&self) -> RecordId {
                self.id
            }
        }
    };
    ($ty:ty, $key:expr, $name:literal, $item:expr, $normalize:path) => {
        impl Record for $ty {
            const STORAGE_KEY: &'static str = $key;
            const COLLECTION: &'static str = $name;
            const ITEM_KEY: Option<&'static str> = $item;

            fn id(&self) -> RecordId {
                self.id
            }

            fn normalize(&mut self) {
                $normalize(self);
            }
        }
    };
}

impl_record!(Task, keys::TASKS, "tasks");
impl_record!(Note, keys::NOTES, "notes");
impl_record!(Project, keys::PROJECTS, "projects", None, Project::settle_completion);
impl_record!(SavedScript, keys::SCRIPTS, "scripts", Some("script"));

/// Ordered collection of one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self { records: Vec::new() }
    }
}

impl<R: Record> Collection<R> {
    /// Wrap an existing newest-first list.
    pub const fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Load the collection from the gateway; a missing key is an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway read fails or the stored blob is not
    /// a valid JSON array of records.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let Some(raw) = store.get(R::STORAGE_KEY)? else {
            return Ok(Self::default());
        };
        let mut records: Vec<R> = serde_json::from_str(&raw)?;
        records.iter_mut().for_each(R::normalize);
        log::debug!(
            "event=collection_load module=collection collection={} count={}",
            R::COLLECTION,
            records.len()
        );
        Ok(Self { records })
    }

    /// Write the whole collection to the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the gateway write fails.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        let json = serde_json::to_string(&self.records)?;
        store.set(R::STORAGE_KEY, &json).map_err(|err| {
            log::error!(
                "event=collection_save module=collection status=error collection={} error={err}",
                R::COLLECTION
            );
            err
        })
    }

    /// Remove the collection key from the gateway.
    ///
    /// # Errors
    ///
    /// Returns an error if the gateway write fails.
    pub fn forget(store: &dyn KeyValueStore) -> Result<()> {
        store.remove(R::STORAGE_KEY)
    }

    /// All records, newest first.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Look up a record by id for mutation.
    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut R> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Resolve a user-typed id prefix to a record id.
    pub fn resolve(&self, prefix: &str) -> Option<RecordId> {
        let ids: Vec<RecordId> = self.records.iter().map(Record::id).collect();
        resolve_prefix(prefix, ids.iter())
    }

    /// Insert a record at the front.
    pub fn prepend(&mut self, record: R) {
        self.records.insert(0, record);
    }

    /// Insert several records at the front, keeping their given order.
    pub fn prepend_all(&mut self, records: Vec<R>) {
        self.records.splice(0..0, records);
    }

    /// Remove a record by id.
    pub fn remove(&mut self, id: RecordId) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(index))
    }

    /// Keep only records matching `keep`; returns how many were removed.
    pub fn retain(&mut self, keep: impl FnMut(&R) -> bool) -> usize {
        let before = self.records.len();
        self.records.retain(keep);
        before - self.records.len()
    }

    /// Replace every record.
    pub fn replace_all(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::testing::MemoryStore;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn task(n: u128, text: &str) -> Task {
        Task::new(
            Uuid::from_u128(n),
            text,
            Priority::Medium,
            Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = MemoryStore::new();
        let tasks: Collection<Task> = Collection::load(&store).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let mut tasks = Collection::default();
        tasks.prepend(task(1, "first"));
        tasks.prepend(task(2, "second"));
        tasks.save(&store).unwrap();

        let loaded: Collection<Task> = Collection::load(&store).unwrap();
        assert_eq!(loaded, tasks);
        assert_eq!(loaded.records()[0].text, "second");
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let store = MemoryStore::new();
        store.set(keys::TASKS, "{not json").unwrap();
        let result: Result<Collection<Task>> = Collection::load(&store);
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_load_settles_project_completion() {
        let store = MemoryStore::new();
        store
            .set(
                keys::PROJECTS,
                r#"[
                    {"id":"00000000-0000-0000-0000-000000000001","name":"done","status":"completed",
                     "createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-03-01T00:00:00Z"},
                    {"id":"00000000-0000-0000-0000-000000000002","name":"live","status":"active",
                     "createdAt":"2026-01-01T00:00:00Z","updatedAt":"2026-01-01T00:00:00Z",
                     "completedAt":"2026-02-01T00:00:00Z"}
                ]"#,
            )
            .unwrap();
        let projects: Collection<Project> = Collection::load(&store).unwrap();
        let done = &projects.records()[0];
        assert_eq!(done.completed_at, Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(projects.records()[1].completed_at, None);
    }

    #[test]
    fn test_prepend_all_keeps_order() {
        let mut tasks = Collection::from_records(vec![task(1, "old")]);
        tasks.prepend_all(vec![task(2, "a"), task(3, "b")]);
        let texts: Vec<&str> = tasks.records().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "b", "old"]);
    }

    #[test]
    fn test_remove_and_retain() {
        let mut tasks = Collection::from_records(vec![task(1, "a"), task(2, "b"), task(3, "c")]);
        assert_eq!(tasks.remove(Uuid::from_u128(2)).unwrap().text, "b");
        assert!(tasks.remove(Uuid::from_u128(2)).is_none());

        let removed = tasks.retain(|t| t.text != "a");
        assert_eq!(removed, 1);
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_resolve_prefix() {
        let tasks = Collection::from_records(vec![task(0xabcd_0000, "a")]);
        let full = Uuid::from_u128(0xabcd_0000);
        let prefix = &full.simple().to_string()[..12];
        assert_eq!(tasks.resolve(prefix), Some(full));
        assert_eq!(tasks.resolve("ffffffff"), None);
    }

    #[test]
    fn test_forget_removes_key() {
        let store = MemoryStore::new();
        Collection::from_records(vec![task(1, "a")]).save(&store).unwrap();
        Collection::<Task>::forget(&store).unwrap();
        assert_eq!(store.get(keys::TASKS).unwrap(), None);
    }
}
