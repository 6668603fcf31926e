//! Upload command: hand a note to the document sink.

use crate::cli::commands::open_store;
use crate::config::resolve_outbox_dir;
use crate::error::{Error, Result};
use crate::sink::{DocumentSink, JsonlSink};
use std::path::PathBuf;

/// Execute `qn upload`.
///
/// Sends `{title, created_at, uploaded_at}`; the store id stays local.
///
/// # Errors
///
/// Returns an error if the note does not exist or the sink write fails.
pub fn execute(
    id: i64,
    outbox: Option<&PathBuf>,
    collection: &str,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let store = open_store(db_path)?;
    let note = store.get(id)?.ok_or(Error::NoteNotFound { id })?;

    let document = serde_json::json!({
        "title": note.title,
        "created_at": note.created_at,
        "uploaded_at": chrono::Utc::now().timestamp_millis(),
    });

    let sink = JsonlSink::new(resolve_outbox_dir(outbox.map(PathBuf::as_path)));
    sink.add(collection, &document)?;

    if crate::is_silent() {
        println!("{id}");
    } else if json {
        let output = serde_json::json!({
            "id": id,
            "collection": collection,
            "uploaded": true,
        });
        println!("{output}");
    } else {
        println!("Uploaded note #{id} to '{collection}'");
    }

    Ok(())
}
