//! Database schema definitions.
//!
//! Timestamps are stored as INTEGER (Unix milliseconds).

use rusqlite::{Connection, Result};

/// The complete SQL schema for the quicknote database.
///
/// Every statement is `IF NOT EXISTS`, so applying it to a populated
/// database leaves existing rows untouched.
pub const SCHEMA_SQL: &str = r"
-- Notes: the only table the note store reads or writes
CREATE TABLE IF NOT EXISTS notes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    title      TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

-- Preferences: flat key-value pairs (e.g. username)
CREATE TABLE IF NOT EXISTS preferences (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

/// Apply the schema to a database connection.
///
/// # Errors
///
/// Returns an error if a pragma or the schema batch fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    // In-memory databases silently keep journal_mode=memory
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    conn.execute_batch(SCHEMA_SQL)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?
            .exists([table])
    }

    #[test]
    fn test_schema_applies() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).expect("Schema should apply");

        assert!(table_exists(&conn, "notes").unwrap());
        assert!(table_exists(&conn, "preferences").unwrap());
        assert!(!table_exists(&conn, "sessions").unwrap());
    }

    #[test]
    fn test_schema_reapply_keeps_rows() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO notes (title, created_at) VALUES ('keep me', 1)",
            [],
        )
        .unwrap();

        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_notes_columns() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let columns: Vec<(String, String, bool)> = conn
            .prepare("SELECT name, type, \"notnull\" FROM pragma_table_info('notes')")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            columns,
            vec![
                ("id".to_string(), "INTEGER".to_string(), false),
                ("title".to_string(), "TEXT".to_string(), true),
                ("created_at".to_string(), "INTEGER".to_string(), true),
            ]
        );
    }
}
