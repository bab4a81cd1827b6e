//! Daily reminder decisions for an external notification scheduler.
//!
//! Nothing here delivers notifications. These helpers answer when the next
//! reminder should fire and whether one is due right now.

use crate::db::ReminderSettings;
use crate::mood_core::MoodEntry;
use chrono::{DateTime, Duration, TimeZone};

/// The next local occurrence of the reminder time strictly after `now`.
///
/// Returns `None` when the reminder is disabled. If the reminder time does
/// not exist on a given day because of a DST jump, that day is skipped.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveTime, TimeZone, Utc};
/// use moodlog::db::ReminderSettings;
/// use moodlog::ops::next_fire_at;
///
/// let settings = ReminderSettings {
///     enabled: true,
///     time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
/// };
/// let now = Utc.with_ymd_and_hms(2024, 6, 1, 21, 0, 0).unwrap();
/// let next = next_fire_at(&settings, &now).unwrap();
/// assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 2, 20, 0, 0).unwrap());
/// ```
pub fn next_fire_at<Tz: TimeZone>(
    settings: &ReminderSettings,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    if !settings.enabled {
        return None;
    }

    let tz = now.timezone();
    let today = now.date_naive();

    // A DST gap can swallow the reminder time on at most one of these days
    (0..=2)
        .filter_map(|offset| today.checked_add_signed(Duration::days(offset)))
        .map(|date| date.and_time(settings.time))
        .filter_map(|local| tz.from_local_datetime(&local).earliest())
        .find(|candidate| candidate > now)
}

/// Whether the user should be reminded now.
///
/// True when the reminder is enabled, the local time of `now` is at or past
/// the reminder time, and nothing has been logged today.
pub fn reminder_due<Tz: TimeZone>(
    settings: &ReminderSettings,
    today_entry: Option<&MoodEntry>,
    now: &DateTime<Tz>,
) -> bool {
    settings.enabled && today_entry.is_none() && now.time() >= settings.time
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::{EntryId, Mood};
    use chrono::{FixedOffset, NaiveTime, Utc};

    fn enabled_at(hour: u32, minute: u32) -> ReminderSettings {
        ReminderSettings {
            enabled: true,
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_disabled_never_fires() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert_eq!(next_fire_at(&ReminderSettings::default(), &now), None);
        assert!(!reminder_due(&ReminderSettings::default(), None, &now));
    }

    #[test]
    fn test_next_fire_later_today() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let next = next_fire_at(&enabled_at(20, 0), &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_is_strictly_after_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        let next = next_fire_at(&enabled_at(20, 0), &now).unwrap();
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 6, 2, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_next_fire_in_local_time() {
        let tz = FixedOffset::west_opt(4 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 12, 31, 22, 0, 0).unwrap();
        let next = next_fire_at(&enabled_at(8, 30), &now).unwrap();
        assert_eq!(next, tz.with_ymd_and_hms(2025, 1, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_due_only_after_time_and_without_entry() {
        let settings = enabled_at(20, 0);
        let before = Utc.with_ymd_and_hms(2024, 6, 1, 19, 59, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();

        assert!(!reminder_due(&settings, None, &before));
        assert!(reminder_due(&settings, None, &at));

        let logged = MoodEntry {
            id: EntryId(1),
            timestamp: before,
            mood: Mood::Happy,
            intensity: 6.0,
            notes: None,
        };
        assert!(!reminder_due(&settings, Some(&logged), &at));
    }
}
