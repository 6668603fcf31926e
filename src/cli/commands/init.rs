//! Create the note database.
//!
//! `qn init` is the only command that creates the database file. Running
//! it again fails with `AlreadyInitialized` unless `--force` is given, in
//! which case the schema is re-applied to the existing file. Stored notes
//! and preferences are never removed.

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::store::NoteStore;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    notes: usize,
    reinitialized: bool,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved, the database already
/// exists (without `force`), or the database cannot be created.
pub fn execute(force: bool, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine the quicknote home directory".to_string())
    })?;

    let existed = db_path.exists();
    if existed && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let store = NoteStore::open(&db_path)?;
    let notes = store.count()?;
    store.close()?;

    if json {
        let output = InitOutput {
            database: db_path,
            notes,
            reinitialized: existed,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if existed {
        println!("Re-initialized quicknote database ({notes} notes kept)");
        println!("  Database: {}", db_path.display());
    } else {
        println!("Initialized quicknote database");
        println!("  Database: {}", db_path.display());
        println!();
        println!("Next: qn add \"your first note\"");
    }

    Ok(())
}
