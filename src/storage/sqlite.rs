//! SQLite storage implementation.
//!
//! Owns the single connection to the database file. Every write goes
//! through [`SqliteStorage::mutate`], which wraps it in an IMMEDIATE
//! transaction so a second writer (another process on the same file)
//! waits on the busy timeout instead of interleaving.

use crate::error::Result;
use crate::model::Note;
use crate::storage::schema::apply_schema;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Context for a mutation operation.
///
/// Passed to mutation closures so they can report how many rows they
/// touched; the count is logged when the transaction commits.
#[derive(Debug)]
pub struct MutationContext {
    /// Name of the operation being performed.
    pub op_name: String,
    /// Rows changed by the statements run so far.
    pub rows_affected: usize,
}

impl MutationContext {
    #[must_use]
    pub fn new(op_name: &str) -> Self {
        Self {
            op_name: op_name.to_string(),
            rows_affected: 0,
        }
    }

    /// Add the result of an `execute` call to the running total.
    pub fn record_rows(&mut self, rows: usize) {
        self.rows_affected += rows;
    }
}

fn map_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
    })
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database file and applies the schema if needed. Waits up
    /// to 5 seconds for a lock held by another connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened note database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Re-apply the schema on an open connection. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema batch fails.
    pub fn ensure_schema(&self) -> Result<()> {
        apply_schema(&self.conn)?;
        Ok(())
    }

    /// Execute a mutation inside an IMMEDIATE transaction.
    ///
    /// Commits when the closure succeeds; the transaction is rolled back
    /// on drop if it returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if beginning, executing, or committing fails.
    pub fn mutate<F, R>(&mut self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction, &mut MutationContext) -> Result<R>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(rusqlite::TransactionBehavior::Immediate)?;

        let mut ctx = MutationContext::new(op);
        let result = f(&tx, &mut ctx)?;

        tx.commit()?;
        debug!(op = %ctx.op_name, rows = ctx.rows_affected, "Mutation committed");

        Ok(result)
    }

    // ===============
    // Note Operations
    // ===============

    /// Insert a note and return it with its generated id.
    ///
    /// `title` is stored as given; callers trim and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_note(&mut self, title: &str, created_at: i64) -> Result<Note> {
        self.mutate("insert_note", |tx, ctx| {
            let rows = tx.execute(
                "INSERT INTO notes (title, created_at) VALUES (?1, ?2)",
                rusqlite::params![title, created_at],
            )?;
            ctx.record_rows(rows);

            Ok(Note {
                id: tx.last_insert_rowid(),
                title: title.to_string(),
                created_at,
            })
        })
    }

    /// Replace a note's title. Returns the number of rows changed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_note_title(&mut self, id: i64, title: &str) -> Result<usize> {
        self.mutate("update_note_title", |tx, ctx| {
            let rows = tx.execute(
                "UPDATE notes SET title = ?1 WHERE id = ?2",
                rusqlite::params![title, id],
            )?;
            ctx.record_rows(rows);
            Ok(rows)
        })
    }

    /// Delete a note. Returns the number of rows removed (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_note(&mut self, id: i64) -> Result<usize> {
        self.mutate("delete_note", |tx, ctx| {
            let rows = tx.execute("DELETE FROM notes WHERE id = ?1", [id])?;
            ctx.record_rows(rows);
            Ok(rows)
        })
    }

    /// Get a note by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_note(&self, id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, title, created_at FROM notes WHERE id = ?1",
                [id],
                map_note,
            )
            .optional()?;
        Ok(note)
    }

    /// Load every note, in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn all_notes(&self) -> Result<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, created_at FROM notes ORDER BY id ASC")?;
        let notes = stmt
            .query_map([], map_note)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(notes)
    }

    /// Count stored notes.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_notes(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    // =====================
    // Preference Operations
    // =====================

    /// Get a preference value by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite a preference.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();

        self.mutate("set_preference", |tx, ctx| {
            let rows = tx.execute(
                "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                rusqlite::params![key, value, now],
            )?;
            ctx.record_rows(rows);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_memory() {
        let storage = SqliteStorage::open_memory();
        assert!(storage.is_ok());
    }

    #[test]
    fn test_note_crud() {
        let mut storage = SqliteStorage::open_memory().unwrap();

        // Create
        let note = storage.insert_note("First", 100).unwrap();
        assert_eq!(note.title, "First");
        assert_eq!(note.created_at, 100);

        // Read
        let fetched = storage.get_note(note.id).unwrap().unwrap();
        assert_eq!(fetched, note);
        assert_eq!(storage.count_notes().unwrap(), 1);

        // Update
        assert_eq!(storage.update_note_title(note.id, "Renamed").unwrap(), 1);
        let fetched = storage.get_note(note.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Renamed");
        assert_eq!(fetched.created_at, 100);

        // Delete
        assert_eq!(storage.delete_note(note.id).unwrap(), 1);
        assert!(storage.get_note(note.id).unwrap().is_none());
        assert_eq!(storage.delete_note(note.id).unwrap(), 0);
        assert_eq!(storage.update_note_title(note.id, "ghost").unwrap(), 0);
    }

    #[test]
    fn test_all_notes_in_id_order() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.insert_note("a", 30).unwrap();
        storage.insert_note("b", 10).unwrap();
        storage.insert_note("c", 20).unwrap();

        let titles: Vec<String> = storage
            .all_notes()
            .unwrap()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_autoincrement_never_reuses_ids() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let first = storage.insert_note("one", 1).unwrap();
        let second = storage.insert_note("two", 2).unwrap();
        storage.delete_note(second.id).unwrap();

        let third = storage.insert_note("three", 3).unwrap();
        assert!(third.id > second.id);
        assert!(second.id > first.id);
    }

    #[test]
    fn test_preferences_upsert() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        assert!(storage.get_preference("username").unwrap().is_none());

        storage.set_preference("username", "ada").unwrap();
        assert_eq!(storage.get_preference("username").unwrap().as_deref(), Some("ada"));

        storage.set_preference("username", "grace").unwrap();
        assert_eq!(storage.get_preference("username").unwrap().as_deref(), Some("grace"));
    }

    #[test]
    fn test_failed_mutation_rolls_back() {
        let mut storage = SqliteStorage::open_memory().unwrap();

        let result: Result<()> = storage.mutate("failing", |tx, _ctx| {
            tx.execute("INSERT INTO notes (title, created_at) VALUES ('x', 1)", [])?;
            Err(crate::error::Error::Other("abort".into()))
        });

        assert!(result.is_err());
        assert_eq!(storage.count_notes().unwrap(), 0);
    }
}
