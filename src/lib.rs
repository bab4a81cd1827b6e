/*!
# Moodlog

Moodlog is a daily mood journal. Each entry records a mood, an intensity
from 0 to 10 and an optional note. Entries can be browsed, searched,
summarized per day, week, month or year, and shown on a calendar.

## Core Features

- Log a mood with intensity and notes, backdated if needed
- Find the entry that represents today
- Case-insensitive search across moods, notes and dates
- Counts by mood per period, with donut-chart segments
- A month calendar showing the mood of each day
- Daily reminder settings and "is a reminder due" checks

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `mood_core`: Pure data model and calendar arithmetic
- `db`: SQLite storage behind the `MoodStore` trait
- `ops`: Derived queries via `MoodQueryService`
- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure

## Usage Example

```rust,no_run
use chrono::Local;
use moodlog::db::{Database, MoodStore};
use moodlog::mood_core::{Mood, NewMoodEntry, Period};
use moodlog::ops::MoodQueryService;
use moodlog::Config;

fn main() -> moodlog::AppResult<()> {
    let config = Config::load()?;
    config.ensure_data_directory_exists()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let query = MoodQueryService::new(db);

    query.store().create(NewMoodEntry::new(Mood::Happy, 7.0, Local::now()))?;
    let trends = query.trends(Period::Week, &Local::now())?;
    println!("{} entries this week", trends.total);
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Database storage for mood entries and settings
pub mod db;
/// Error types and utilities for error handling
pub mod errors;
/// Mood entry types and period arithmetic
pub mod mood_core;
/// Queries, search, trends, calendar and reminders
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use db::{Database, MoodStore};
pub use errors::{AppError, AppResult};
pub use mood_core::{EntryId, Mood, MoodEntry, NewMoodEntry, Period, TimeRange};
pub use ops::MoodQueryService;
