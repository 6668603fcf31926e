//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::SortOrder;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
    /// Comma-separated values
    Csv,
}

pub mod commands;

/// quicknote - a small local note keeper
#[derive(Parser, Debug)]
#[command(name = "qn", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.quicknote/quicknote.db)
    #[arg(long, global = true, env = "QN_DB")]
    pub db: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json, csv)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Output only the ID (for scripting)
    #[arg(long, global = true)]
    pub silent: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the note database
    Init {
        /// Re-apply the schema to an existing database (never deletes notes)
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Add a note
    Add {
        /// Note title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// List notes
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single note
    Show {
        /// Note ID
        id: i64,
    },

    /// Change a note's title
    Update {
        /// Note ID
        id: i64,

        /// New title (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note ID
        id: i64,
    },

    /// Export notes to a timestamped JSON file
    Export(ExportArgs),

    /// Send a note to the document outbox
    Upload {
        /// Note ID
        id: i64,

        /// Outbox directory (default: ~/.quicknote/outbox)
        #[arg(long, env = "QN_OUTBOX")]
        outbox: Option<PathBuf>,

        /// Collection to append to
        #[arg(long, default_value = "notes")]
        collection: String,
    },

    /// Preferences (key-value settings)
    Pref {
        #[command(subcommand)]
        command: PrefCommands,
    },

    /// Show the stored username
    Whoami,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Note Commands
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Case-insensitive title filter
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Sort order by creation time
    #[arg(short, long, value_enum, default_value_t)]
    pub order: SortOrder,

    /// Maximum notes to show
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output directory (default: ~/.quicknote/exports)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Only export notes whose title contains this (case-insensitive)
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Order of notes in the file
    #[arg(short, long, value_enum, default_value_t)]
    pub order: SortOrder,
}

// ============================================================================
// Preference Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum PrefCommands {
    /// Read a preference
    Get {
        /// Key
        key: String,
    },

    /// Write a preference
    Set {
        /// Key
        key: String,

        /// Value
        value: String,
    },
}
