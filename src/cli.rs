use clap::{Parser, Subcommand};
use std::io::Write;
use thiserror::Error;

use crate::models::Mood;
use crate::storage::SlotStorage;
use crate::store::{EntryStore, PersistError};
use crate::utils::format_entry_date;

#[derive(Parser)]
#[command(name = "mood")]
#[command(about = "Mood Tracker - pick a mood, jot a note, review your history")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/storage)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Launch interactive TUI (default if no subcommand)
    Tui,
    /// Record a mood entry
    Add {
        /// Mood name, glyph or label (angry, sad, neutral, happy, great)
        mood: Mood,
        /// Optional note
        #[arg(short, long, default_value = "")]
        note: String,
    },
    /// Print every entry, newest first
    List,
    /// Print the available moods
    Moods,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Failed to save entry: {0}")]
    PersistError(#[from] PersistError),
    #[error("Failed to write output: {0}")]
    OutputError(#[from] std::io::Error),
}

/// Handle the add command
pub fn handle_add<S: SlotStorage>(
    mood: Mood,
    note: &str,
    store: &mut EntryStore<S>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let entry = store.record(mood, note)?;
    writeln!(out, "Saved {} (ID: {})", entry.mood(), entry.id())?;
    Ok(())
}

/// Handle the list command
pub fn handle_list<S: SlotStorage>(
    store: &EntryStore<S>,
    date_format: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let entries = store.sorted_descending();
    if entries.is_empty() {
        writeln!(out, "No entries yet")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(
            out,
            "{}  {} - {}",
            entry.mood().glyph(),
            entry.mood().label(),
            format_entry_date(entry.date(), date_format)
        )?;
        for line in entry.note().lines() {
            writeln!(out, "    {}", line)?;
        }
    }
    Ok(())
}

/// Handle the moods command
pub fn handle_moods(out: &mut impl Write) -> Result<(), CliError> {
    for mood in Mood::all() {
        writeln!(out, "{}  {:<8} {}", mood.glyph(), mood.name(), mood.label())?;
    }
    Ok(())
}
