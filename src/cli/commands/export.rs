//! Export command implementation.

use crate::cli::ExportArgs;
use crate::cli::commands::open_store;
use crate::config::resolve_export_dir;
use crate::error::Result;
use crate::export::Exporter;
use crate::model::NoteQuery;
use std::path::PathBuf;

/// Execute `qn export`.
///
/// Export failures are returned like any other error and reported once by
/// the caller; nothing is retried.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the file cannot be written.
pub fn execute(args: &ExportArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let query = NoteQuery {
        filter: args.filter.clone(),
        order: args.order,
    };
    let notes = store.list(&query)?;

    let exporter = Exporter::new(resolve_export_dir(args.dir.as_deref()));
    let outcome = exporter.export(&notes)?;

    if crate::is_silent() {
        println!("{}", outcome.path.display());
    } else if json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("Exported {} notes", outcome.count);
        println!("  File: {}", outcome.path.display());
    }

    Ok(())
}
