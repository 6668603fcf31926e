//! Note command implementations (add, list, show, update, delete).

use crate::cli::ListArgs;
use crate::cli::commands::{format_timestamp, open_store};
use crate::error::{Error, Result};
use crate::model::{Note, NoteQuery};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Output for add.
#[derive(Serialize)]
struct AddOutput<'a> {
    created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<&'a Note>,
}

/// Output for list.
#[derive(Serialize)]
struct ListOutput<'a> {
    items: &'a [Note],
    count: usize,
    order: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'a str>,
}

/// Output for update/delete.
#[derive(Serialize)]
struct ChangeOutput {
    id: i64,
    changed: bool,
}

/// Execute `qn add`.
pub fn add(title: &[String], db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let title = title.join(" ");

    let note = store.insert(&title)?;

    if crate::is_silent() {
        if let Some(note) = &note {
            println!("{}", note.id);
        }
        return Ok(());
    }

    if json {
        let output = AddOutput {
            created: note.is_some(),
            note: note.as_ref(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        match note {
            Some(note) => println!("Added note #{}: {}", note.id, note.title),
            None => println!("Nothing added: title is empty"),
        }
    }

    Ok(())
}

/// Execute `qn list`.
pub fn list(args: &ListArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let query = NoteQuery {
        filter: args.filter.clone(),
        order: args.order,
    };

    let mut notes = store.list(&query)?;
    // A blank filter matches everything, so report it as no filter at all
    let filter = query
        .filter
        .as_deref()
        .filter(|_| query.needle().is_some());
    if let Some(limit) = args.limit {
        notes.truncate(limit);
    }

    if crate::is_csv() {
        println!("id,title,created_at");
        for n in &notes {
            println!("{},{},{}", n.id, crate::csv_escape(&n.title), n.created_at);
        }
    } else if json {
        let output = ListOutput {
            items: &notes,
            count: notes.len(),
            order: query.order.as_str(),
            filter,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if crate::is_silent() {
        for n in &notes {
            println!("{}", n.id);
        }
    } else if notes.is_empty() {
        match filter {
            Some(filter) => println!("No notes matching '{filter}'."),
            None => println!("No notes yet. Add one with `qn add <title>`."),
        }
    } else {
        println!("Notes ({} found, {}):", notes.len(), query.order);
        println!();
        for n in &notes {
            println!(
                "{:>5}  {}  {}",
                format!("#{}", n.id).dimmed(),
                format_timestamp(n.created_at).cyan(),
                n.title
            );
        }
    }

    Ok(())
}

/// Execute `qn show`.
pub fn show(id: i64, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let note = store.get(id)?.ok_or(Error::NoteNotFound { id })?;

    if json {
        println!("{}", serde_json::to_string(&note)?);
    } else {
        println!("{} {}", format!("#{}", note.id).bold(), note.title);
        println!("  Created: {}", format_timestamp(note.created_at));
    }

    Ok(())
}

/// Execute `qn update`.
///
/// A blank title or unknown id changes nothing and is reported, not failed.
pub fn update(id: i64, title: &[String], db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let changed = store.update(id, &title.join(" "))?;

    if crate::is_silent() {
        if changed {
            println!("{id}");
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&ChangeOutput { id, changed })?);
    } else if changed {
        println!("Updated note #{id}");
    } else {
        println!("Nothing updated: no note #{id} or title is empty");
    }

    Ok(())
}

/// Execute `qn delete`.
pub fn delete(id: i64, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store = open_store(db_path)?;
    let changed = store.delete(id)?;

    if crate::is_silent() {
        if changed {
            println!("{id}");
        }
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string(&ChangeOutput { id, changed })?);
    } else if changed {
        println!("Deleted note #{id}");
    } else {
        println!("Nothing deleted: no note #{id}");
    }

    Ok(())
}
