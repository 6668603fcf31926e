//! Append-only document sink.
//!
//! Stands in for a remote document store: callers hand over a document and
//! move on. Nothing is read back, acknowledged, or retried.

use std::path::PathBuf;

use tracing::debug;

use crate::error::{Error, Result};
use crate::export::append_jsonl;

/// Destination for fire-and-forget documents.
pub trait DocumentSink {
    /// Append `document` to `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is invalid or the write fails.
    fn add(&self, collection: &str, document: &serde_json::Value) -> Result<()>;
}

/// Sink that appends each document as one line of `<dir>/<collection>.jsonl`.
#[derive(Debug, Clone)]
pub struct JsonlSink {
    dir: PathBuf,
}

impl JsonlSink {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File backing `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection name is invalid.
    pub fn collection_path(&self, collection: &str) -> Result<PathBuf> {
        validate_collection(collection)?;
        Ok(self.dir.join(format!("{collection}.jsonl")))
    }
}

impl DocumentSink for JsonlSink {
    fn add(&self, collection: &str, document: &serde_json::Value) -> Result<()> {
        let path = self.collection_path(collection)?;
        append_jsonl(&path, document)?;
        debug!(collection, path = %path.display(), "Document added");
        Ok(())
    }
}

/// Collection names become file names, so keep them to `[A-Za-z0-9_-]+`.
fn validate_collection(collection: &str) -> Result<()> {
    let valid = !collection.is_empty()
        && collection
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!(
            "invalid collection name '{collection}'"
        )))
    }
}
