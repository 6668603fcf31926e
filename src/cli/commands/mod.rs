//! Command implementations.

pub mod completions;
pub mod export;
pub mod init;
pub mod note;
pub mod pref;
pub mod upload;
pub mod version;

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::store::NoteStore;
use std::path::PathBuf;

/// Resolve the database path and require that it already exists.
///
/// Commands other than `init` never create the database implicitly.
pub(crate) fn existing_db_path(db_path: Option<&PathBuf>) -> Result<PathBuf> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    Ok(db_path)
}

/// Open and initialize the note store for a command.
pub(crate) fn open_store(db_path: Option<&PathBuf>) -> Result<NoteStore> {
    let path = existing_db_path(db_path)?;
    NoteStore::open(path)
}

/// Render a millisecond timestamp as local `YYYY-MM-DD HH:MM`.
pub(crate) fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis).map_or_else(
        || millis.to_string(),
        |dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        },
    )
}
