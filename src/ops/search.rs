//! Free-text search over an already-fetched set of entries.

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::mood_core::MoodEntry;
use chrono::TimeZone;
use std::fmt::Display;
use tracing::debug;

/// Filters `scope` down to entries matching `query`, preserving order.
///
/// An entry matches when the query appears, ignoring case, in its mood
/// category, its mood glyph, its notes, or its date formatted as
/// `"Jun 1, 2024"` in `tz`.
///
/// An empty query clears the search and returns the whole scope. A query of
/// only whitespace is still a filter.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use moodlog::mood_core::{EntryId, Mood, MoodEntry};
/// use moodlog::ops::search_entries;
///
/// let entry = MoodEntry {
///     id: EntryId(1),
///     timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
///     mood: Mood::Happy,
///     intensity: 7.0,
///     notes: Some("Picnic in the park".to_string()),
/// };
/// let scope = vec![entry];
///
/// assert_eq!(search_entries("PICNIC", &scope, &Utc).len(), 1);
/// assert_eq!(search_entries("jun 1", &scope, &Utc).len(), 1);
/// assert!(search_entries("rain", &scope, &Utc).is_empty());
/// ```
pub fn search_entries<Tz>(query: &str, scope: &[MoodEntry], tz: &Tz) -> Vec<MoodEntry>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if query.is_empty() {
        return scope.to_vec();
    }

    let needle = query.to_lowercase();
    let matches: Vec<MoodEntry> = scope
        .iter()
        .filter(|entry| entry_matches(entry, &needle, tz))
        .cloned()
        .collect();

    debug!(
        "Search '{}' matched {} of {} entries",
        query,
        matches.len(),
        scope.len()
    );
    matches
}

fn entry_matches<Tz>(entry: &MoodEntry, needle: &str, tz: &Tz) -> bool
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let date = entry
        .timestamp
        .with_timezone(tz)
        .format(DISPLAY_DATE_FORMAT)
        .to_string();

    entry.mood_category().to_lowercase().contains(needle)
        || entry.mood.symbol().contains(needle)
        || entry
            .notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains(needle))
        || date.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::{EntryId, Mood};
    use chrono::{FixedOffset, Utc};

    fn entry(id: i64, day: u32, hour: u32, mood: Mood, notes: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: EntryId(id),
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            mood,
            intensity: 5.0,
            notes: notes.map(str::to_string),
        }
    }

    fn scope() -> Vec<MoodEntry> {
        vec![
            entry(3, 2, 9, Mood::Neutral, None),
            entry(2, 1, 20, Mood::Sad, Some("Missed the bus, happy hour cancelled")),
            entry(1, 1, 8, Mood::Happy, Some("Sunny walk")),
        ]
    }

    #[test]
    fn test_empty_query_returns_scope_unchanged() {
        let scope = scope();
        assert_eq!(search_entries("", &scope, &Utc), scope);
        assert!(search_entries("", &[], &Utc).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let scope = scope();
        let lower = search_entries("happy", &scope, &Utc);
        let upper = search_entries("HAPPY", &scope, &Utc);
        assert_eq!(lower, upper);

        // Category of entry 1 and notes of entry 2
        let ids: Vec<i64> = lower.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_search_matches_notes_category_and_glyph() {
        let scope = scope();
        assert_eq!(search_entries("sunny", &scope, &Utc)[0].id, EntryId(1));
        assert_eq!(search_entries("neutral", &scope, &Utc)[0].id, EntryId(3));
        assert_eq!(search_entries("😔", &scope, &Utc)[0].id, EntryId(2));
        assert!(search_entries("excited", &scope, &Utc).is_empty());
    }

    #[test]
    fn test_search_matches_medium_date_in_timezone() {
        let scope = scope();
        let ids: Vec<i64> = search_entries("Jun 1, 2024", &scope, &Utc)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, vec![2, 1]);

        // 20:00 UTC on Jun 1 is already Jun 2 at UTC+5
        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let ids: Vec<i64> = search_entries("jun 2", &scope, &tz)
            .iter()
            .map(|e| e.id.0)
            .collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_whitespace_query_is_a_filter() {
        let scope = vec![MoodEntry {
            notes: Some("x".to_string()),
            ..entry(9, 1, 8, Mood::Angry, None)
        }];
        // The formatted date always contains a space
        assert_eq!(search_entries(" ", &scope, &Utc).len(), 1);
        assert!(search_entries("  ", &scope, &Utc).is_empty());
    }
}
