//! Note model and list query types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single note.
///
/// `id` and `created_at` are assigned by the store on insert and never
/// change afterwards; only `title` is mutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-generated identifier (never reused after deletion)
    pub id: i64,

    /// Note text, stored trimmed
    pub title: String,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Note {
    /// Case-insensitive substring match against the title.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
    }
}

/// Ordering applied to a list snapshot, keyed on `created_at`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Most recently created first
    #[default]
    #[value(alias = "newest", alias = "desc")]
    NewestFirst,
    /// Oldest first
    #[value(alias = "oldest", alias = "asc")]
    OldestFirst,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "newest-first",
            Self::OldestFirst => "oldest-first",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter and ordering for `NoteStore::list`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    /// Case-insensitive title substring; `None` or blank matches everything
    pub filter: Option<String>,
    pub order: SortOrder,
}

impl NoteQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// The lowercased filter needle, or `None` when the filter is blank.
    ///
    /// A non-blank filter is matched as given, surrounding spaces included.
    #[must_use]
    pub fn needle(&self) -> Option<String> {
        self.filter
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(str::to_lowercase)
    }

    /// Apply the filter and ordering to a snapshot.
    ///
    /// The sort is stable, so notes sharing a `created_at` keep the order
    /// they had in `notes`.
    #[must_use]
    pub fn apply(&self, notes: Vec<Note>) -> Vec<Note> {
        let mut matched: Vec<Note> = match self.needle() {
            Some(needle) => notes
                .into_iter()
                .filter(|n| n.title_contains(&needle))
                .collect(),
            None => notes,
        };

        match self.order {
            SortOrder::NewestFirst => matched.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortOrder::OldestFirst => matched.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }

        matched
    }
}

/// Trim a user-supplied title, returning `None` when nothing is left.
#[must_use]
pub fn normalize_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
