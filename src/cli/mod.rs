//! Command-line interface for the moodlog binary.
//!
//! The binary is a thin host over the library: each subcommand maps onto one
//! store or query operation and renders the result.

pub mod commands;
pub mod render;

use crate::constants::{
    APP_DESCRIPTION, APP_NAME, DEFAULT_INTENSITY, LOG_FORMAT_JSON, LOG_FORMAT_TEXT,
};
use crate::mood_core::{EntryId, Mood, Period};
use clap::{Parser, Subcommand};

/// A daily mood journal with trends and reminders
#[derive(Parser, Debug)]
#[clap(name = APP_NAME, about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Log output format for diagnostics on stderr
    #[clap(
        long,
        global = true,
        value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON],
        default_value = LOG_FORMAT_TEXT
    )]
    pub log_format: String,

    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Print results as JSON instead of text
    #[clap(long, global = true)]
    pub json: bool,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Log a mood (happy, neutral, sad, angry or the emoji itself)
    Log {
        mood: Mood,

        /// Intensity from 0 to 10; values outside the range are clamped
        #[clap(short, long, default_value_t = DEFAULT_INTENSITY, allow_negative_numbers = true)]
        intensity: f32,

        /// Free-text note
        #[clap(short, long)]
        note: Option<String>,

        /// When the mood applies (YYYY-MM-DD HH:MM local time, or RFC 3339); defaults to now
        #[clap(long)]
        at: Option<String>,
    },

    /// Show the entry representing today
    Today,

    /// List entries, newest first
    List {
        /// First day to include (YYYY-MM-DD)
        #[clap(long)]
        from: Option<String>,

        /// Last day to include (YYYY-MM-DD)
        #[clap(long)]
        to: Option<String>,
    },

    /// Show one entry in full
    Show { id: EntryId },

    /// Search moods, notes and dates
    Search { query: String },

    /// Replace the notes of an entry
    EditNotes { id: EntryId, notes: String },

    /// Delete one entry
    Delete { id: EntryId },

    /// Delete every entry
    Clear {
        /// Confirm deleting all entries
        #[clap(long)]
        yes: bool,
    },

    /// Counts by mood for the current day, week, month or year
    Trends {
        #[clap(short, long, default_value = "month")]
        period: Period,
    },

    /// Show a month with the mood of each day
    Calendar {
        /// Month to show (YYYY-MM); defaults to the current month
        #[clap(long)]
        month: Option<String>,
    },

    /// Show or change the daily reminder
    Reminder {
        #[clap(subcommand)]
        action: Option<ReminderAction>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ReminderAction {
    /// Show the current reminder settings
    Show,

    /// Turn the reminder on
    Enable {
        /// Time of day (HH:MM); keeps the saved time when omitted
        #[clap(long)]
        at: Option<String>,
    },

    /// Turn the reminder off
    Disable,
}
