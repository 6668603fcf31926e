//! JSON snapshot export.
//!
//! Writes the notes a caller already holds (usually the current `list`
//! result) to a timestamped JSON file. Export is one-way: nothing reads
//! these files back.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::export::file::atomic_write;
use crate::model::Note;

/// Result of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportOutcome {
    /// File that was written.
    pub path: PathBuf,
    /// Number of notes in the file.
    pub count: usize,
}

/// Writes note snapshots into a directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Exporter {
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Get the output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export `notes` to `notes-<timestamp>.json` using the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn export(&self, notes: &[Note]) -> Result<ExportOutcome> {
        self.export_at(notes, Utc::now())
    }

    /// Export with an explicit timestamp for the file name.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the file write fails.
    pub fn export_at(&self, notes: &[Note], at: DateTime<Utc>) -> Result<ExportOutcome> {
        let path = self.output_dir.join(export_file_name(at));
        let payload = serde_json::to_vec_pretty(notes)?;

        atomic_write(&path, &payload)?;
        info!(path = %path.display(), count = notes.len(), "Exported notes");

        Ok(ExportOutcome {
            path,
            count: notes.len(),
        })
    }
}

/// `notes-YYYYMMDD-HHMMSS-mmm.json`
#[must_use]
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("notes-{}.json", at.format("%Y%m%d-%H%M%S-%3f"))
}
