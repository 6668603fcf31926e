//! Preference command implementations.

use crate::cli::PrefCommands;
use crate::cli::commands::existing_db_path;
use crate::error::Result;
use crate::prefs::Preferences;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct PrefOutput<'a> {
    key: &'a str,
    value: Option<&'a str>,
}

/// Execute pref commands.
///
/// # Errors
///
/// Returns an error if the database is missing or the read/write fails.
pub fn execute(command: &PrefCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        PrefCommands::Get { key } => get(key, db_path, json),
        PrefCommands::Set { key, value } => set(key, value, db_path, json),
    }
}

fn get(key: &str, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let prefs = Preferences::open(&existing_db_path(db_path)?)?;
    let value = prefs.get(key)?;
    print_value(key, value.as_deref(), json)
}

fn set(key: &str, value: &str, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut prefs = Preferences::open(&existing_db_path(db_path)?)?;
    prefs.set(key, value)?;

    if crate::is_silent() {
        println!("{key}");
    } else if json {
        let output = PrefOutput {
            key,
            value: Some(value),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Saved {key} = {value}");
    }

    Ok(())
}

/// Execute `qn whoami`.
///
/// # Errors
///
/// Returns an error if the database is missing or the read fails.
pub fn whoami(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let prefs = Preferences::open(&existing_db_path(db_path)?)?;
    let username = prefs.username()?;
    print_value(crate::prefs::USERNAME_KEY, username.as_deref(), json)
}

fn print_value(key: &str, value: Option<&str>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&PrefOutput { key, value })?);
        return Ok(());
    }

    match value {
        Some(value) => println!("{value}"),
        None if !crate::is_silent() => println!("{key} is not set"),
        None => {}
    }

    Ok(())
}
