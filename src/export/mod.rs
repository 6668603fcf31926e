//! File export.
//!
//! - **Snapshot**: the current note list → a timestamped JSON array file
//! - **File**: atomic writes and JSONL appends used by export and the
//!   document sink

mod file;
mod snapshot;

pub use file::{append_jsonl, atomic_write};
pub use snapshot::{ExportOutcome, Exporter, export_file_name};
