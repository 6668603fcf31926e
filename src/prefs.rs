//! Key-value preferences.
//!
//! A flat string map in the `preferences` table. It shares the database
//! file with the note store but holds its own connection and has no
//! interaction with notes.

use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use std::path::Path;

/// Preference key holding the user's display name.
pub const USERNAME_KEY: &str = "username";

/// Preference store.
#[derive(Debug)]
pub struct Preferences {
    storage: SqliteStorage,
}

impl Preferences {
    /// Open preferences in the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self {
            storage: SqliteStorage::open(path)?,
        })
    }

    /// Preferences in a private in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created.
    pub fn open_memory() -> Result<Self> {
        Ok(Self {
            storage: SqliteStorage::open_memory()?,
        })
    }

    /// Read a preference. `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key or a failed read.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_preference(validate_key(key)?)
    }

    /// Write a preference, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty key or a failed write.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = validate_key(key)?;
        self.storage.set_preference(key, value)
    }

    /// The stored username, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    pub fn username(&self) -> Result<Option<String>> {
        self.get(USERNAME_KEY)
    }
}

fn validate_key(key: &str) -> Result<&str> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Error::InvalidArgument(
            "preference key cannot be empty".to_string(),
        ));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_unset_is_none() {
        let prefs = Preferences::open_memory().unwrap();
        assert!(prefs.username().unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let mut prefs = Preferences::open_memory().unwrap();
        prefs.set(USERNAME_KEY, "ada").unwrap();
        assert_eq!(prefs.username().unwrap().as_deref(), Some("ada"));

        prefs.set(USERNAME_KEY, "grace").unwrap();
        assert_eq!(prefs.get("username").unwrap().as_deref(), Some("grace"));
    }

    #[test]
    fn test_empty_key_rejected() {
        let mut prefs = Preferences::open_memory().unwrap();
        assert!(matches!(prefs.set("  ", "v"), Err(Error::InvalidArgument(_))));
        assert!(matches!(prefs.get(""), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_shares_file_with_notes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qn.db");

        let store = crate::store::NoteStore::open(&path).unwrap();
        store.insert("a note").unwrap();

        let mut prefs = Preferences::open(&path).unwrap();
        prefs.set(USERNAME_KEY, "ada").unwrap();
        drop(prefs);

        let prefs = Preferences::open(&path).unwrap();
        assert_eq!(prefs.username().unwrap().as_deref(), Some("ada"));
        assert_eq!(store.count().unwrap(), 1);
    }
}
