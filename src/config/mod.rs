//! Configuration management.
//!
//! Resolves where quicknote keeps its files. Everything lives under one
//! base directory:
//!
//! - **Database**: `<base>/quicknote.db`
//! - **Exports**: `<base>/exports/`
//! - **Outbox** (document sink): `<base>/outbox/`
//!
//! The base directory is `~/.quicknote/` unless `QN_HOME` says otherwise.

use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "QN_HOME";

/// Environment variable overriding the database path.
pub const DB_ENV: &str = "QN_DB";

/// Database file name inside the base directory.
pub const DB_FILE_NAME: &str = "quicknote.db";

/// Get the quicknote base directory.
///
/// Priority:
/// 1. `QN_HOME` environment variable
/// 2. `~/.quicknote/`
#[must_use]
pub fn base_dir() -> Option<PathBuf> {
    if let Some(dir) = non_empty_env(HOME_ENV) {
        return Some(PathBuf::from(dir));
    }

    directories::BaseDirs::new().map(|b| b.home_dir().join(".quicknote"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `QN_DB` environment variable
/// 3. `<base>/quicknote.db`
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if let Some(path) = non_empty_env(DB_ENV) {
        return Some(PathBuf::from(path));
    }

    base_dir().map(|dir| dir.join(DB_FILE_NAME))
}

/// Resolve the export directory.
///
/// An explicit directory wins; otherwise `<base>/exports`, falling back
/// to the current directory when no home directory is known.
#[must_use]
pub fn resolve_export_dir(explicit_dir: Option<&Path>) -> PathBuf {
    explicit_dir.map_or_else(
        || base_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join("exports")),
        Path::to_path_buf,
    )
}

/// Resolve the document sink directory (`<base>/outbox` by default).
#[must_use]
pub fn resolve_outbox_dir(explicit_dir: Option<&Path>) -> PathBuf {
    explicit_dir.map_or_else(
        || base_dir().map_or_else(|| PathBuf::from("outbox"), |dir| dir.join("outbox")),
        Path::to_path_buf,
    )
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
