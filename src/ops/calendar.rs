//! Calendar overlay: which mood represents each day, and month grids.

use crate::constants::{CALENDAR_GRID_CELLS, DAYS_PER_WEEK};
use crate::errors::ValidationError;
use crate::mood_core::{local_date, EntryId, Mood, MoodEntry};
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeZone, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mood shown for each local calendar day that has at least one entry.
pub type DayMoodIndex = BTreeMap<NaiveDate, Mood>;

/// Maps each local day in `tz` to the mood of its most recent entry.
///
/// The winner is the entry with the latest timestamp; entries with equal
/// timestamps resolve to the higher id. The result does not depend on the
/// order of `entries`.
pub fn day_mood_index<Tz: TimeZone>(entries: &[MoodEntry], tz: &Tz) -> DayMoodIndex {
    let mut latest: BTreeMap<NaiveDate, (DateTime<Utc>, EntryId, Mood)> = BTreeMap::new();

    for entry in entries {
        let day = local_date(&entry.timestamp, tz);
        let candidate = (entry.timestamp, entry.id, entry.mood);
        latest
            .entry(day)
            .and_modify(|current| {
                if (candidate.0, candidate.1) > (current.0, current.1) {
                    *current = candidate;
                }
            })
            .or_insert(candidate);
    }

    latest
        .into_iter()
        .map(|(day, (_, _, mood))| (day, mood))
        .collect()
}

/// A calendar month, used to navigate the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDate` if `month` is not 1 through 12.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|_| CalendarMonth { year, month })
            .ok_or_else(|| ValidationError::InvalidDate(format!("{:04}-{:02}", year, month)))
    }

    pub fn containing(date: NaiveDate) -> Self {
        CalendarMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            CalendarMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            CalendarMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            CalendarMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            CalendarMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days_in_month(&self) -> u32 {
        let first = self.first_day();
        first
            .checked_add_months(Months::new(1))
            .map(|next| (next - first).num_days() as u32)
            .unwrap_or(31)
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CalendarCell {
    /// Padding before the first or after the last day of the month.
    Blank,
    Day {
        day: u32,
        date: NaiveDate,
        mood: Option<Mood>,
    },
}

/// A month laid out as six Sunday-first weeks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub month: CalendarMonth,
    /// Always `CALENDAR_GRID_CELLS` cells, row by row.
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// Lays out `month`, attaching the indexed mood to each day that has one.
    ///
    /// # Examples
    ///
    /// ```
    /// use moodlog::ops::{CalendarCell, CalendarMonth, DayMoodIndex, MonthGrid};
    ///
    /// // June 2024 starts on a Saturday
    /// let june = CalendarMonth::new(2024, 6).unwrap();
    /// let grid = MonthGrid::build(june, &DayMoodIndex::new());
    /// assert_eq!(grid.cells.len(), 42);
    /// assert_eq!(grid.cells[5], CalendarCell::Blank);
    /// assert!(matches!(grid.cells[6], CalendarCell::Day { day: 1, .. }));
    /// ```
    pub fn build(month: CalendarMonth, index: &DayMoodIndex) -> Self {
        let first = month.first_day();
        let leading = first.weekday().num_days_from_sunday() as usize;
        let days = month.days_in_month() as usize;

        let cells = (0..CALENDAR_GRID_CELLS)
            .map(|position| {
                if position < leading || position >= leading + days {
                    return CalendarCell::Blank;
                }
                let day = (position - leading + 1) as u32;
                let date = NaiveDate::from_ymd_opt(month.year, month.month, day).unwrap_or(first);
                CalendarCell::Day {
                    day,
                    date,
                    mood: index.get(&date).copied(),
                }
            })
            .collect();

        MonthGrid { month, cells }
    }

    /// Grid rows of `DAYS_PER_WEEK` cells each.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn previous(&self, index: &DayMoodIndex) -> Self {
        MonthGrid::build(self.month.previous(), index)
    }

    pub fn next(&self, index: &DayMoodIndex) -> Self {
        MonthGrid::build(self.month.next(), index)
    }
}
