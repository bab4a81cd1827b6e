//! Counts by mood and the donut-chart segments derived from them.

use crate::mood_core::{Mood, MoodEntry};
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of entries per mood.
///
/// Moods with no entries are absent rather than present with a zero count.
/// Iteration follows the declaration order of [`Mood`].
pub type MoodCounts = BTreeMap<Mood, usize>;

/// Groups entries by mood and counts them.
pub fn count_by_mood(entries: &[MoodEntry]) -> MoodCounts {
    let mut counts = MoodCounts::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    counts
}

/// One slice of the mood donut chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSegment {
    pub mood: Mood,
    pub count: usize,
    /// Share of the total, in `(0, 1]`.
    pub fraction: f64,
    /// Sum of the fractions of all preceding segments.
    pub start_fraction: f64,
    /// Hex color of the mood, e.g. `#FFCC00`.
    pub color: &'static str,
}

/// Turns counts into chart segments sized by share of the total.
///
/// # Examples
///
/// ```
/// use moodlog::mood_core::Mood;
/// use moodlog::ops::{chart_segments, MoodCounts};
///
/// let mut counts = MoodCounts::new();
/// counts.insert(Mood::Happy, 3);
/// counts.insert(Mood::Sad, 1);
///
/// let segments = chart_segments(&counts);
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[0].fraction, 0.75);
/// assert_eq!(segments[1].start_fraction, 0.75);
/// assert_eq!(segments[1].color, "#007AFF");
/// ```
pub fn chart_segments(counts: &MoodCounts) -> Vec<ChartSegment> {
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start_fraction = 0.0;
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .map(|(&mood, &count)| {
            let fraction = count as f64 / total as f64;
            let segment = ChartSegment {
                mood,
                count,
                fraction,
                start_fraction,
                color: mood.chart_color(),
            };
            start_fraction += fraction;
            segment
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::EntryId;
    use chrono::{TimeZone, Utc};

    fn entry(id: i64, mood: Mood) -> MoodEntry {
        MoodEntry {
            id: EntryId(id),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            mood,
            intensity: 5.0,
            notes: None,
        }
    }

    #[test]
    fn test_counts_omit_absent_moods() {
        let entries = vec![
            entry(1, Mood::Sad),
            entry(2, Mood::Happy),
            entry(3, Mood::Sad),
        ];
        let counts = count_by_mood(&entries);

        assert_eq!(counts.get(&Mood::Sad), Some(&2));
        assert_eq!(counts.get(&Mood::Happy), Some(&1));
        assert!(!counts.contains_key(&Mood::Angry));
        assert!(!counts.contains_key(&Mood::Neutral));
        assert_eq!(counts.values().sum::<usize>(), entries.len());
    }

    #[test]
    fn test_counts_iterate_in_declaration_order() {
        let entries = vec![
            entry(1, Mood::Angry),
            entry(2, Mood::Neutral),
            entry(3, Mood::Happy),
        ];
        let moods: Vec<Mood> = count_by_mood(&entries).into_keys().collect();
        assert_eq!(moods, vec![Mood::Happy, Mood::Neutral, Mood::Angry]);
    }

    #[test]
    fn test_no_entries_no_segments() {
        assert!(count_by_mood(&[]).is_empty());
        assert!(chart_segments(&MoodCounts::new()).is_empty());
    }

    #[test]
    fn test_segments_cover_the_whole_circle() {
        let entries = vec![
            entry(1, Mood::Happy),
            entry(2, Mood::Neutral),
            entry(3, Mood::Sad),
            entry(4, Mood::Angry),
            entry(5, Mood::Angry),
        ];
        let segments = chart_segments(&count_by_mood(&entries));

        assert_eq!(segments.len(), 4);
        let total: f64 = segments.iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-9);

        let last = segments.last().unwrap();
        assert_eq!(last.mood, Mood::Angry);
        assert!((last.start_fraction + last.fraction - 1.0).abs() < 1e-9);
        assert_eq!(last.color, "#FF3B30");
    }

    #[test]
    fn test_single_mood_fills_chart() {
        let segments = chart_segments(&count_by_mood(&[entry(1, Mood::Neutral)]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].fraction, 1.0);
        assert_eq!(segments[0].start_fraction, 0.0);
        assert_eq!(segments[0].color, "#00C7BE");
    }
}
