//! quicknote - a small local note keeper
//!
//! This crate provides the core functionality for the `qn` CLI tool.
//!
//! # Architecture
//!
//! - [`store`] - The note store: initialize, insert, update, delete, list
//! - [`model`] - Data types (Note, SortOrder, NoteQuery)
//! - [`storage`] - SQLite database layer
//! - [`prefs`] - Key-value preferences
//! - [`export`] - JSON snapshot export
//! - [`sink`] - Append-only document sink
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Path resolution
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod prefs;
pub mod sink;
pub mod storage;
pub mod store;

pub use error::{Error, Result};
pub use model::{Note, NoteQuery, SortOrder};
pub use store::NoteStore;

/// Global silent mode flag for `--silent` output.
///
/// When set, mutate commands print only the ID instead of full output.
pub static SILENT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Global CSV output flag (set when `--format csv`).
pub static CSV_OUTPUT: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);

/// Check if silent mode is active.
#[inline]
pub fn is_silent() -> bool {
    SILENT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Check if CSV output is requested.
#[inline]
pub fn is_csv() -> bool {
    CSV_OUTPUT.load(std::sync::atomic::Ordering::Relaxed)
}

/// Escape a value for CSV output (wrap in quotes if it contains commas, quotes, or newlines).
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
