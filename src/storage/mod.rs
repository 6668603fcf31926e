//! SQLite storage layer for quicknote.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for file-backed databases
//! - IMMEDIATE transactions for every write
//!
//! # Submodules
//!
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod schema;
pub mod sqlite;

pub use sqlite::{MutationContext, SqliteStorage};
