//! The note store.
//!
//! [`NoteStore`] is the object the CLI (or any other front end) talks to.
//! It has two states:
//!
//! - **Uninitialized**: no database handle. Every operation except
//!   [`NoteStore::initialize`] fails with [`Error::NotInitialized`].
//! - **Ready**: one long-lived [`SqliteStorage`] handle, acquired by
//!   `initialize` and released by [`NoteStore::close`] or drop.
//!
//! The handle sits behind a mutex, which doubles as the global write
//! lock: insert, update, and delete never overlap, and the store can be
//! shared across threads.
//!
//! Invalid input is a silent no-op throughout. A blank title on insert or
//! update, or an unknown id on update or delete, changes nothing and is
//! reported through the return value rather than an error.

use crate::error::{Error, Result};
use crate::model::{Note, NoteQuery, normalize_title};
use crate::storage::SqliteStorage;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Source of `created_at` timestamps.
pub trait Clock: Send + Sync {
    /// Current time in Unix milliseconds.
    fn now_millis(&self) -> i64;
}

/// Wall-clock time via `chrono`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Where the store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    File(PathBuf),
    /// Private in-memory database, discarded on close.
    Memory,
}

/// CRUD and query access to the `notes` table.
pub struct NoteStore {
    location: StoreLocation,
    clock: Box<dyn Clock>,
    handle: Mutex<Option<SqliteStorage>>,
}

impl std::fmt::Debug for NoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("location", &self.location)
            .field("ready", &self.is_ready())
            .finish_non_exhaustive()
    }
}

impl NoteStore {
    /// A store backed by a database file. Nothing is opened until
    /// [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_location(StoreLocation::File(path.into()), Box::new(SystemClock))
    }

    /// A store backed by a private in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_location(StoreLocation::Memory, Box::new(SystemClock))
    }

    /// A store with an explicit location and timestamp source.
    #[must_use]
    pub fn with_location(location: StoreLocation, clock: Box<dyn Clock>) -> Self {
        Self {
            location,
            clock,
            handle: Mutex::new(None),
        }
    }

    /// Create and initialize a file-backed store in one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    /// Whether `initialize` has completed and the handle is held.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.handle.lock().map(|h| h.is_some()).unwrap_or(false)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<SqliteStorage>>> {
        self.handle
            .lock()
            .map_err(|_| Error::Other("note store lock poisoned".to_string()))
    }

    fn with_storage<R>(&self, f: impl FnOnce(&mut SqliteStorage) -> Result<R>) -> Result<R> {
        let mut guard = self.lock()?;
        let storage = guard.as_mut().ok_or(Error::NotInitialized)?;
        f(storage)
    }

    /// Open the database handle and create the schema if absent.
    ///
    /// Calling this again on a ready store re-applies the (idempotent)
    /// schema on the existing handle and never touches stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageUnavailable`] if the database cannot be
    /// opened or the schema cannot be applied.
    pub fn initialize(&self) -> Result<()> {
        let mut guard = self.lock()?;

        if let Some(storage) = guard.as_ref() {
            storage.ensure_schema()?;
            debug!("Note store already initialized");
            return Ok(());
        }

        let storage = match &self.location {
            StoreLocation::File(path) => SqliteStorage::open(path)?,
            StoreLocation::Memory => SqliteStorage::open_memory()?,
        };
        *guard = Some(storage);

        info!(location = ?self.location, "Note store ready");
        Ok(())
    }

    /// Release the database handle. The store returns to the
    /// uninitialized state and can be initialized again.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.lock()?;
        if guard.take().is_some() {
            debug!("Note store closed");
        }
        Ok(())
    }

    /// Create a note.
    ///
    /// Returns `None` without writing anything if `title` is blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the insert fails.
    pub fn insert(&self, title: &str) -> Result<Option<Note>> {
        self.with_storage(|storage| {
            let Some(title) = normalize_title(title) else {
                debug!("Ignoring insert with blank title");
                return Ok(None);
            };

            let note = storage.insert_note(title, self.clock.now_millis())?;
            debug!(id = note.id, "Inserted note");
            Ok(Some(note))
        })
    }

    /// Replace a note's title.
    ///
    /// Returns `false` when nothing changed: blank title or unknown id.
    /// `id` and `created_at` are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the update fails.
    pub fn update(&self, id: i64, title: &str) -> Result<bool> {
        self.with_storage(|storage| {
            let Some(title) = normalize_title(title) else {
                debug!(id, "Ignoring update with blank title");
                return Ok(false);
            };

            let rows = storage.update_note_title(id, title)?;
            if rows == 0 {
                debug!(id, "Update matched no note");
            }
            Ok(rows > 0)
        })
    }

    /// Permanently remove a note.
    ///
    /// Returns `false` if no note had this id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the delete fails.
    pub fn delete(&self, id: i64) -> Result<bool> {
        self.with_storage(|storage| {
            let rows = storage.delete_note(id)?;
            if rows == 0 {
                debug!(id, "Delete matched no note");
            }
            Ok(rows > 0)
        })
    }

    /// Snapshot of all notes matching `query`, in the requested order.
    ///
    /// Reads the whole table and filters and sorts in memory on every call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the read fails.
    pub fn list(&self, query: &NoteQuery) -> Result<Vec<Note>> {
        let notes = self.with_storage(|storage| storage.all_notes())?;
        Ok(query.apply(notes))
    }

    /// Look up a single note.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the read fails.
    pub fn get(&self, id: i64) -> Result<Option<Note>> {
        self.with_storage(|storage| storage.get_note(id))
    }

    /// Number of stored notes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `initialize`, or a storage
    /// error if the read fails.
    pub fn count(&self) -> Result<usize> {
        self.with_storage(|storage| storage.count_notes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SortOrder;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Advances by a fixed step on every read.
    struct StepClock {
        next: AtomicI64,
        step: i64,
    }

    impl StepClock {
        fn new(start: i64, step: i64) -> Self {
            Self {
                next: AtomicI64::new(start),
                step,
            }
        }
    }

    impl Clock for StepClock {
        fn now_millis(&self) -> i64 {
            self.next.fetch_add(self.step, Ordering::SeqCst)
        }
    }

    fn ready_store() -> NoteStore {
        let store = NoteStore::with_location(
            StoreLocation::Memory,
            Box::new(StepClock::new(1_000, 10)),
        );
        store.initialize().unwrap();
        store
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_operations_before_initialize_fail() {
        let store = NoteStore::in_memory();
        assert!(!store.is_ready());

        assert!(matches!(store.insert("x"), Err(Error::NotInitialized)));
        assert!(matches!(store.update(1, "x"), Err(Error::NotInitialized)));
        assert!(matches!(store.delete(1), Err(Error::NotInitialized)));
        assert!(matches!(store.list(&NoteQuery::new()), Err(Error::NotInitialized)));
        assert!(matches!(store.get(1), Err(Error::NotInitialized)));
        assert!(matches!(store.count(), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_insert_round_trip() {
        let store = NoteStore::in_memory();
        store.initialize().unwrap();

        let before = chrono::Utc::now().timestamp_millis();
        let note = store.insert("  Buy milk  ").unwrap().unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        assert_eq!(note.title, "Buy milk");
        assert!(note.created_at >= before && note.created_at <= after);

        let listed = store.list(&NoteQuery::new()).unwrap();
        assert_eq!(listed, vec![note]);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");

        let store = NoteStore::new(&path);
        store.initialize().unwrap();
        store.insert("one").unwrap();
        store.insert("two").unwrap();
        let snapshot = store.list(&NoteQuery::new()).unwrap();

        for _ in 0..3 {
            store.initialize().unwrap();
        }
        assert_eq!(store.list(&NoteQuery::new()).unwrap(), snapshot);

        // A fresh handle on the same file sees the same rows
        store.close().unwrap();
        let reopened = NoteStore::open(&path).unwrap();
        assert_eq!(reopened.list(&NoteQuery::new()).unwrap(), snapshot);
    }

    #[test]
    fn test_close_returns_to_uninitialized() {
        let store = ready_store();
        store.close().unwrap();
        assert!(!store.is_ready());
        assert!(matches!(store.count(), Err(Error::NotInitialized)));
    }

    #[test]
    fn test_update_keeps_id_and_created_at() {
        let store = ready_store();
        let note = store.insert("draft").unwrap().unwrap();

        assert!(store.update(note.id, "final").unwrap());

        let updated = store.get(note.id).unwrap().unwrap();
        assert_eq!(updated.id, note.id);
        assert_eq!(updated.created_at, note.created_at);
        assert_eq!(updated.title, "final");
    }

    #[test]
    fn test_update_blank_title_is_noop() {
        let store = ready_store();
        let note = store.insert("keep").unwrap().unwrap();

        assert!(!store.update(note.id, "   ").unwrap());
        assert_eq!(store.get(note.id).unwrap().unwrap().title, "keep");
    }

    #[test]
    fn test_delete_is_final() {
        let store = ready_store();
        let note = store.insert("temporary").unwrap().unwrap();
        store.insert("other").unwrap();

        assert!(store.delete(note.id).unwrap());
        let listed = store.list(&NoteQuery::new()).unwrap();
        assert!(listed.iter().all(|n| n.id != note.id));

        // Neither call errors nor brings the row back
        assert!(!store.update(note.id, "zombie").unwrap());
        assert!(!store.delete(note.id).unwrap());
        assert!(store.get(note.id).unwrap().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = ready_store();
        let first = store.insert("a").unwrap().unwrap();
        let last = store.insert("b").unwrap().unwrap();
        store.delete(last.id).unwrap();

        let next = store.insert("c").unwrap().unwrap();
        assert!(next.id > last.id);
        assert!(last.id > first.id);
    }

    #[test]
    fn test_filter_correctness() {
        let store = ready_store();
        store.insert("Buy milk").unwrap();
        store.insert("Buy eggs").unwrap();
        store.insert("Walk dog").unwrap();

        let newest = store
            .list(&NoteQuery::new().filter("buy").order(SortOrder::NewestFirst))
            .unwrap();
        assert_eq!(titles(&newest), vec!["Buy eggs", "Buy milk"]);

        let oldest = store
            .list(&NoteQuery::new().filter("buy").order(SortOrder::OldestFirst))
            .unwrap();
        assert_eq!(titles(&oldest), vec!["Buy milk", "Buy eggs"]);

        let none = store.list(&NoteQuery::new().filter("cat")).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_with_leading_space_is_not_trimmed() {
        let store = ready_store();
        store.insert("Buy milk").unwrap();
        store.insert("milkshake").unwrap();

        let matched = store.list(&NoteQuery::new().filter(" milk")).unwrap();
        assert_eq!(titles(&matched), vec!["Buy milk"]);
    }

    #[test]
    fn test_sort_correctness() {
        let store = ready_store();
        let t1 = store.insert("t1").unwrap().unwrap();
        let t2 = store.insert("t2").unwrap().unwrap();
        let t3 = store.insert("t3").unwrap().unwrap();
        assert!(t1.created_at < t2.created_at && t2.created_at < t3.created_at);

        let newest = store.list(&NoteQuery::new().order(SortOrder::NewestFirst)).unwrap();
        assert_eq!(titles(&newest), vec!["t3", "t2", "t1"]);

        let oldest = store.list(&NoteQuery::new().order(SortOrder::OldestFirst)).unwrap();
        assert_eq!(titles(&oldest), vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_blank_insert_is_noop() {
        let store = ready_store();
        store.insert("real").unwrap();

        assert!(store.insert("").unwrap().is_none());
        assert!(store.insert("   ").unwrap().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_sequential_ids_unique() {
        let store = ready_store();
        let ids: HashSet<i64> = (0..50)
            .map(|i| store.insert(&format!("note {i}")).unwrap().unwrap().id)
            .collect();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_concurrent_ids_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(NoteStore::open(dir.path().join("notes.db")).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..10)
                        .map(|i| store.insert(&format!("t{t}-{i}")).unwrap().unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(ids.len(), 80);
        assert_eq!(store.count().unwrap(), 80);
    }
}
