//! Derived read operations over a mood store.

use super::calendar::{day_mood_index, CalendarMonth, DayMoodIndex, MonthGrid};
use super::search::search_entries;
use super::trends::{chart_segments, count_by_mood, ChartSegment, MoodCounts};
use crate::db::MoodStore;
use crate::errors::AppResult;
use crate::mood_core::{day_range, MoodEntry, Period, TimeRange};
use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt::Display;
use tracing::{debug, info};

/// Counts and chart segments for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodTrends {
    pub period: Period,
    pub range: TimeRange,
    pub total: usize,
    pub counts: MoodCounts,
    pub segments: Vec<ChartSegment>,
}

/// Answers questions about the journal using the store it owns.
///
/// The service keeps no state of its own; every call reads through to the
/// store.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use moodlog::db::{Database, MoodStore};
/// use moodlog::mood_core::{Mood, NewMoodEntry};
/// use moodlog::ops::MoodQueryService;
///
/// let db = Database::open_in_memory()?;
/// db.initialize_schema()?;
/// let query = MoodQueryService::new(db);
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
/// query.store().create(NewMoodEntry::new(Mood::Happy, 7.0, at))?;
///
/// let today = query.today_entry_at(&at)?.unwrap();
/// assert_eq!(today.mood, Mood::Happy);
/// # Ok::<(), moodlog::AppError>(())
/// ```
pub struct MoodQueryService<S> {
    store: S,
}

impl<S: MoodStore> MoodQueryService<S> {
    pub fn new(store: S) -> Self {
        MoodQueryService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Today's entry in the system's local timezone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn today_entry(&self) -> AppResult<Option<MoodEntry>> {
        self.today_entry_at(&Local::now())
    }

    /// The newest entry on the local day containing `now`, or `None`.
    ///
    /// When several entries share the day, the one with the latest
    /// timestamp represents it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn today_entry_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> AppResult<Option<MoodEntry>> {
        let range = day_range(&now.timezone(), now.date_naive())?;
        debug!("Looking up today's entry in {} .. {}", range.start, range.end);
        Ok(self.store.list_in_range(&range)?.into_iter().next())
    }

    /// Entries in `range`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn entries_in_range(&self, range: &TimeRange) -> AppResult<Vec<MoodEntry>> {
        self.store.list_in_range(range)
    }

    /// Counts entries in `range` by mood. Absent moods are omitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn counts_by_mood(&self, range: &TimeRange) -> AppResult<MoodCounts> {
        let entries = self.store.list_in_range(range)?;
        Ok(count_by_mood(&entries))
    }

    /// Counts and chart segments for the `period` containing `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the period cannot be computed or the store cannot
    /// be read.
    pub fn trends<Tz: TimeZone>(
        &self,
        period: Period,
        now: &DateTime<Tz>,
    ) -> AppResult<MoodTrends> {
        let range = period.range_containing(now)?;
        let counts = self.counts_by_mood(&range)?;
        let total = counts.values().sum();
        info!("Computed {:?} trends over {} entries", period, total);

        Ok(MoodTrends {
            period,
            range,
            total,
            segments: chart_segments(&counts),
            counts,
        })
    }

    /// Filters `scope` by a free-text query. See [`search_entries`].
    pub fn search<Tz>(&self, query: &str, scope: &[MoodEntry], tz: &Tz) -> Vec<MoodEntry>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        search_entries(query, scope, tz)
    }

    /// Searches every stored entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn search_all<Tz>(&self, query: &str, tz: &Tz) -> AppResult<Vec<MoodEntry>>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let scope = self.store.list_all()?;
        Ok(search_entries(query, &scope, tz))
    }

    /// Day-to-mood index over `entries`. See [`day_mood_index`].
    pub fn day_mood_index<Tz: TimeZone>(&self, entries: &[MoodEntry], tz: &Tz) -> DayMoodIndex {
        day_mood_index(entries, tz)
    }

    /// Month grid for `month` with every stored entry overlaid.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn month_grid<Tz: TimeZone>(&self, month: CalendarMonth, tz: &Tz) -> AppResult<MonthGrid> {
        let entries = self.store.list_all()?;
        let index = day_mood_index(&entries, tz);
        Ok(MonthGrid::build(month, &index))
    }
}
