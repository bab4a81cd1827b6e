//! High-level read operations for the mood journal.
//!
//! This module layers derived queries over a `MoodStore`: today's entry,
//! free-text search, counts by mood with chart segments, the calendar
//! overlay, and reminder decisions. None of it persists state of its own.

pub mod calendar;
pub mod query;
pub mod reminder;
pub mod search;
pub mod trends;

// Re-export commonly used items
pub use calendar::{day_mood_index, CalendarCell, CalendarMonth, DayMoodIndex, MonthGrid};
pub use query::{MoodQueryService, MoodTrends};
pub use reminder::{next_fire_at, reminder_due};
pub use search::search_entries;
pub use trends::{chart_segments, count_by_mood, ChartSegment, MoodCounts};
