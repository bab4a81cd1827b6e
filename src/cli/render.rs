//! Plain-text rendering of entries, trends and calendars.
//!
//! Every function returns a `String` so the output can be asserted on
//! without a terminal.

use crate::constants::{
    CALENDAR_HEADER_FORMAT, DISPLAY_DATE_FORMAT, NOTES_PREVIEW_CHARS, NOTES_PREVIEW_ELLIPSIS,
    NO_MOOD_LOGGED_TEXT, REMINDER_TIME_FORMAT,
};
use crate::db::ReminderSettings;
use crate::mood_core::MoodEntry;
use crate::ops::{CalendarCell, MonthGrid, MoodTrends};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

const BAR_WIDTH: usize = 30;
const WEEKDAY_HEADER: &str = "Sun Mon Tue Wed Thu Fri Sat";

/// Shortens notes for a one-line listing.
///
/// # Examples
///
/// ```
/// use moodlog::cli::render::notes_preview;
///
/// assert_eq!(notes_preview("short"), "short");
/// assert_eq!(
///     notes_preview("Went for a long run by the river before work"),
///     "Went for a long run by the riv..."
/// );
/// ```
pub fn notes_preview(notes: &str) -> String {
    if notes.chars().count() <= NOTES_PREVIEW_CHARS {
        return notes.to_string();
    }
    let mut preview: String = notes.chars().take(NOTES_PREVIEW_CHARS).collect();
    preview.push_str(NOTES_PREVIEW_ELLIPSIS);
    preview
}

fn display_time<Tz>(entry: &MoodEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = entry.timestamp.with_timezone(tz);
    format!("{} {}", local.format(DISPLAY_DATE_FORMAT), local.format("%H:%M"))
}

/// One list row: id, local time, mood, intensity and a notes preview.
pub fn entry_line<Tz>(entry: &MoodEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut line = format!(
        "#{:<4} {:<19} {:<10} {:>4.1}",
        entry.id.0,
        display_time(entry, tz),
        entry.mood.to_string(),
        entry.intensity
    );
    if let Some(notes) = entry.notes.as_deref().filter(|n| !n.is_empty()) {
        line.push_str("  ");
        line.push_str(&notes_preview(notes));
    }
    line
}

/// Rows for a list of entries, or a placeholder when there are none.
pub fn entry_list<Tz>(entries: &[MoodEntry], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if entries.is_empty() {
        return "No entries found.".to_string();
    }
    entries
        .iter()
        .map(|entry| entry_line(entry, tz))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full view of one entry with untruncated notes.
pub fn entry_detail<Tz>(entry: &MoodEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    let _ = writeln!(out, "Entry #{}", entry.id);
    let _ = writeln!(out, "Date:      {}", display_time(entry, tz));
    let _ = writeln!(out, "Mood:      {}", entry.mood);
    let _ = writeln!(out, "Intensity: {:.1}", entry.intensity);
    let _ = write!(out, "Notes:     {}", entry.notes.as_deref().unwrap_or(""));
    out
}

/// The today line: the mood of today's entry or a placeholder.
pub fn today_summary<Tz>(entry: Option<&MoodEntry>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match entry {
        Some(entry) => entry_detail(entry, tz),
        None => NO_MOOD_LOGGED_TEXT.to_string(),
    }
}

/// Counts per mood with a proportional bar.
pub fn trends_report(trends: &MoodTrends) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Mood trends for this {} ({} entries)",
        format!("{:?}", trends.period).to_lowercase(),
        trends.total
    );

    if trends.segments.is_empty() {
        out.push_str("No entries in this period.");
        return out;
    }

    let rows: Vec<String> = trends
        .segments
        .iter()
        .map(|segment| {
            let width = (segment.fraction * BAR_WIDTH as f64).round() as usize;
            format!(
                "{:<10} {:>4}  {:>5.1}%  {}",
                segment.mood.to_string(),
                segment.count,
                segment.fraction * 100.0,
                "█".repeat(width.max(1))
            )
        })
        .collect();
    out.push_str(&rows.join("\n"));
    out
}

/// A month grid with the mood glyph on each logged day.
pub fn month_calendar(grid: &MonthGrid) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.month.first_day().format(CALENDAR_HEADER_FORMAT));
    let _ = writeln!(out, "{}", WEEKDAY_HEADER);

    let weeks: Vec<String> = grid
        .weeks()
        .map(|week| {
            week.iter()
                .map(|cell| match cell {
                    CalendarCell::Blank => "   ".to_string(),
                    CalendarCell::Day { mood: Some(mood), .. } => format!("{} ", mood.symbol()),
                    CalendarCell::Day { day, mood: None, .. } => format!("{:>3}", day),
                })
                .collect::<Vec<_>>()
                .join(" ")
                .trim_end()
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect();
    out.push_str(&weeks.join("\n"));
    out
}

/// Reminder state with the next time it would fire.
pub fn reminder_status<Tz>(settings: &ReminderSettings, next: Option<&DateTime<Tz>>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = settings.time.format(REMINDER_TIME_FORMAT);
    match (settings.enabled, next) {
        (true, Some(next)) => format!(
            "Daily reminder enabled at {} (next: {} {})",
            time,
            next.format(DISPLAY_DATE_FORMAT),
            next.format("%H:%M")
        ),
        (true, None) => format!("Daily reminder enabled at {}", time),
        (false, _) => format!("Daily reminder disabled (saved time {})", time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_core::{EntryId, Mood, Period};
    use crate::ops::{chart_segments, count_by_mood, CalendarMonth, DayMoodIndex};
    use chrono::{NaiveDate, NaiveTime, Utc};

    fn entry(notes: Option<&str>) -> MoodEntry {
        MoodEntry {
            id: EntryId(12),
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 8, 5, 0).unwrap(),
            mood: Mood::Happy,
            intensity: 7.0,
            notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn test_notes_preview_boundary() {
        let exactly = "a".repeat(30);
        assert_eq!(notes_preview(&exactly), exactly);

        let longer = "a".repeat(31);
        assert_eq!(notes_preview(&longer), format!("{}...", "a".repeat(30)));
    }

    #[test]
    fn test_notes_preview_counts_characters_not_bytes() {
        let emoji = "😊".repeat(31);
        let preview = notes_preview(&emoji);
        assert_eq!(preview.chars().count(), 33);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_entry_line() {
        let line = entry_line(&entry(Some("Sunny walk")), &Utc);
        assert!(line.starts_with("#12"));
        assert!(line.contains("Jun 1, 2024 08:05"));
        assert!(line.contains("😊 Happy"));
        assert!(line.contains("7.0"));
        assert!(line.ends_with("Sunny walk"));
    }

    #[test]
    fn test_entry_detail_keeps_full_notes() {
        let notes = "x".repeat(80);
        let detail = entry_detail(&entry(Some(&notes)), &Utc);
        assert!(detail.contains(&notes));
        assert!(detail.contains("Entry #12"));
    }

    #[test]
    fn test_today_placeholder() {
        assert_eq!(today_summary(None, &Utc), "<No mood logged yet>");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(entry_list(&[], &Utc), "No entries found.");
    }

    #[test]
    fn test_trends_report() {
        let sad = MoodEntry {
            mood: Mood::Sad,
            ..entry(None)
        };
        let entries = vec![entry(None), entry(None), sad];
        let counts = count_by_mood(&entries);
        let trends = MoodTrends {
            period: Period::Month,
            range: Period::Month.range_containing(&entries[0].timestamp).unwrap(),
            total: 3,
            segments: chart_segments(&counts),
            counts,
        };

        let report = trends_report(&trends);
        assert!(report.contains("3 entries"));
        assert!(report.contains("😊 Happy"));
        assert!(report.contains("66.7%"));
        assert!(report.contains("33.3%"));
    }

    #[test]
    fn test_month_calendar() {
        let mut index = DayMoodIndex::new();
        index.insert(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(), Mood::Sad);
        let grid = MonthGrid::build(CalendarMonth::new(2024, 6).unwrap(), &index);

        let text = month_calendar(&grid);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "June 2024");
        assert_eq!(lines[1], WEEKDAY_HEADER);
        assert!(lines[2].ends_with("😔"));
        assert!(lines[3].starts_with("  2"));
        assert!(text.contains(" 30"));
    }

    #[test]
    fn test_reminder_status() {
        let settings = ReminderSettings {
            enabled: true,
            time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        };
        let next = Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap();
        assert_eq!(
            reminder_status(&settings, Some(&next)),
            "Daily reminder enabled at 20:00 (next: Jun 1, 2024 20:00)"
        );

        let disabled = ReminderSettings::default();
        assert_eq!(
            reminder_status::<Utc>(&disabled, None),
            "Daily reminder disabled (saved time 20:00)"
        );
    }
}
