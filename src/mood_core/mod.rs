//! Core mood-entry types and calendar arithmetic without I/O operations.
//!
//! This module contains the pure data model of a mood journal: the closed set
//! of moods, the stored entry record, and the time ranges used to slice the
//! journal by day, week, month or year. Nothing here touches the database.

use crate::constants::{
    DATETIME_INPUT_FORMATS, DATE_FORMAT_ISO, INTENSITY_MAX, INTENSITY_MIN, MONTH_FORMAT_ISO,
    REMINDER_TIME_FORMAT,
};
use crate::errors::ValidationError;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a stored mood entry.
///
/// Assigned by the store at creation and never reused, even after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntryId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntryId)
    }
}

/// The closed set of moods a user can log.
///
/// Each mood has a glyph (the symbol stored with every entry) and a
/// human-readable category name. The mapping between the two is fixed.
///
/// # Examples
///
/// ```
/// use moodlog::mood_core::Mood;
///
/// let mood: Mood = "😔".parse().unwrap();
/// assert_eq!(mood, Mood::Sad);
/// assert_eq!(mood.category(), "Sad");
///
/// // Category names are accepted case-insensitively
/// assert_eq!("ANGRY".parse::<Mood>().unwrap().symbol(), "😡");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
}

impl Mood {
    /// Every mood, in declaration order.
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Angry];

    /// The glyph stored for this mood.
    pub fn symbol(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Angry => "😡",
        }
    }

    /// The category name stored alongside the symbol.
    pub fn category(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
        }
    }

    /// Color used for this mood's chart segment and legend dot.
    pub fn chart_color(&self) -> &'static str {
        match self {
            Mood::Happy => "#FFCC00",
            Mood::Neutral => "#00C7BE",
            Mood::Sad => "#007AFF",
            Mood::Angry => "#FF3B30",
        }
    }

    /// Looks a mood up by its stored glyph.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Mood::ALL.into_iter().find(|mood| mood.symbol() == symbol)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.category())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(mood) = Mood::from_symbol(trimmed) {
            return Ok(mood);
        }
        Mood::ALL
            .into_iter()
            .find(|mood| mood.category().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::InvalidMood(s.to_string()))
    }
}

/// A stored mood entry.
///
/// `timestamp` is kept in UTC with millisecond precision; callers convert to
/// a local timezone for display and day bucketing. Serialized output also
/// carries the mood's glyph and category as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodEntry {
    pub id: EntryId,
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub intensity: f32,
    pub notes: Option<String>,
}

impl MoodEntry {
    /// The category name that corresponds to this entry's mood symbol.
    pub fn mood_category(&self) -> &'static str {
        self.mood.category()
    }
}

impl Serialize for MoodEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MoodEntry", 7)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("timestamp", &self.timestamp)?;
        state.serialize_field("mood", &self.mood)?;
        state.serialize_field("mood_symbol", self.mood.symbol())?;
        state.serialize_field("mood_category", self.mood_category())?;
        state.serialize_field("intensity", &self.intensity)?;
        state.serialize_field("notes", &self.notes)?;
        state.end()
    }
}

/// Input for creating a mood entry. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodEntry {
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub intensity: f32,
    pub notes: Option<String>,
}

impl NewMoodEntry {
    /// Creates an entry input without notes.
    pub fn new<Tz: TimeZone>(mood: Mood, intensity: f32, timestamp: DateTime<Tz>) -> Self {
        NewMoodEntry {
            timestamp: timestamp.with_timezone(&Utc),
            mood,
            intensity,
            notes: None,
        }
    }

    /// Attaches notes. Empty notes are kept as given.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the entry as it will be persisted: intensity clamped into
    /// range and timestamp truncated to whole milliseconds.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NonFiniteIntensity` for NaN or infinite intensity.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        Ok(NewMoodEntry {
            timestamp: truncate_to_millis(self.timestamp),
            intensity: clamp_intensity(self.intensity)?,
            ..self
        })
    }
}

/// The mutable part of an entry. Only notes can change after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub notes: Option<String>,
}

impl EntryPatch {
    pub fn notes(notes: impl Into<String>) -> Self {
        EntryPatch {
            notes: Some(notes.into()),
        }
    }
}

/// Clamps an intensity into `[INTENSITY_MIN, INTENSITY_MAX]`.
///
/// # Examples
///
/// ```
/// use moodlog::mood_core::clamp_intensity;
///
/// assert_eq!(clamp_intensity(12.5).unwrap(), 10.0);
/// assert_eq!(clamp_intensity(-1.0).unwrap(), 0.0);
/// assert!(clamp_intensity(f32::NAN).is_err());
/// ```
pub fn clamp_intensity(value: f32) -> Result<f32, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteIntensity(value));
    }
    Ok(value.clamp(INTENSITY_MIN, INTENSITY_MAX))
}

/// Drops sub-millisecond precision so a stored timestamp reads back unchanged.
pub fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(ts.timestamp_millis())
        .single()
        .unwrap_or(ts)
}

/// Half-open UTC interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Builds a range from any timezone's instants.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyRange` unless `start < end`.
    pub fn new<Tz: TimeZone>(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> Result<Self, ValidationError> {
        let start = start.with_timezone(&Utc);
        let end = end.with_timezone(&Utc);
        if start >= end {
            return Err(ValidationError::EmptyRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(TimeRange { start, end })
    }

    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        self.start <= *ts && *ts < self.end
    }
}

/// Calendar-aligned aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    /// ISO week, Monday through Sunday.
    Week,
    Month,
    Year,
}

impl Period {
    /// The period of this granularity that contains `at`, with boundaries at
    /// local midnight in `at`'s timezone.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use moodlog::mood_core::Period;
    ///
    /// let at = Utc.with_ymd_and_hms(2024, 6, 12, 15, 0, 0).unwrap();
    /// let june = Period::Month.range_containing(&at).unwrap();
    /// assert_eq!(june.start, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    /// assert_eq!(june.end, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap());
    /// ```
    pub fn range_containing<Tz: TimeZone>(
        &self,
        at: &DateTime<Tz>,
    ) -> Result<TimeRange, ValidationError> {
        let tz = at.timezone();
        let date = at.date_naive();
        let unrepresentable = || ValidationError::UnrepresentableDate(date);

        let (first, next) = match self {
            Period::Day => (date, date.succ_opt().ok_or_else(unrepresentable)?),
            Period::Week => {
                let first =
                    date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
                (first, first + Duration::days(7))
            }
            Period::Month => {
                let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                    .ok_or_else(unrepresentable)?;
                let next = first
                    .checked_add_months(Months::new(1))
                    .ok_or_else(unrepresentable)?;
                (first, next)
            }
            Period::Year => (
                NaiveDate::from_ymd_opt(date.year(), 1, 1).ok_or_else(unrepresentable)?,
                NaiveDate::from_ymd_opt(date.year() + 1, 1, 1).ok_or_else(unrepresentable)?,
            ),
        };

        TimeRange::new(start_of_day(&tz, first)?, start_of_day(&tz, next)?)
    }
}

impl FromStr for Period {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "year" => Ok(Period::Year),
            _ => Err(ValidationError::InvalidPeriod(s.to_string())),
        }
    }
}

/// The range covering one local calendar day.
pub fn day_range<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> Result<TimeRange, ValidationError> {
    let next = date
        .succ_opt()
        .ok_or(ValidationError::UnrepresentableDate(date))?;
    TimeRange::new(start_of_day(tz, date)?, start_of_day(tz, next)?)
}

/// First instant of `date` in `tz`.
///
/// When a DST transition skips midnight, the day starts at the first valid
/// local instant after it.
pub fn start_of_day<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
) -> Result<DateTime<Tz>, ValidationError> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or(ValidationError::UnrepresentableDate(date))?;

    match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest),
        LocalResult::None => (1..=3)
            .find_map(|hours| {
                tz.from_local_datetime(&(midnight + Duration::hours(hours)))
                    .earliest()
            })
            .ok_or(ValidationError::UnrepresentableDate(date)),
    }
}

/// The local calendar day an instant falls on.
pub fn local_date<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// Parses a date in YYYY-MM-DD format.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT_ISO)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// Parses a month in YYYY-MM format into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32), ValidationError> {
    let first_of_month = format!("{}-01", input.trim());
    let first = NaiveDate::parse_from_str(&first_of_month, &format!("{}-%d", MONTH_FORMAT_ISO))
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))?;
    Ok((first.year(), first.month()))
}

/// Parses a time of day in HH:MM format.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    NaiveTime::parse_from_str(input.trim(), REMINDER_TIME_FORMAT)
        .map_err(|_| ValidationError::InvalidTime(input.to_string()))
}

/// Parses a date-time given either as RFC 3339 or as a local wall-clock time
/// (`YYYY-MM-DD HH:MM`) interpreted in `tz`.
pub fn parse_datetime<Tz: TimeZone>(
    input: &str,
    tz: &Tz,
) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    DATETIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ValidationError::InvalidDate(input.to_string()))
}
