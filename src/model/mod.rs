//! Data models for quicknote.
//!
//! - Note
//! - SortOrder / NoteQuery (view-time filtering and ordering)

pub mod note;

pub use note::{Note, NoteQuery, SortOrder, normalize_title};
