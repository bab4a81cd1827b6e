//! Integration tests for the query service over a file-backed store.

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use moodlog::db::{Database, MoodStore};
use moodlog::mood_core::{Mood, MoodEntry, NewMoodEntry, Period, TimeRange};
use moodlog::ops::{CalendarCell, CalendarMonth, MoodQueryService};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    query: MoodQueryService<Database>,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().expect("create temp dir");
    let db = Database::open(&dir.path().join("moodlog.db")).expect("open database");
    db.initialize_schema().expect("initialize schema");
    Fixture {
        _dir: dir,
        query: MoodQueryService::new(db),
    }
}

fn log(
    query: &MoodQueryService<Database>,
    mood: Mood,
    intensity: f32,
    y: i32,
    m: u32,
    d: u32,
    h: u32,
) -> MoodEntry {
    query
        .store()
        .create(NewMoodEntry::new(
            mood,
            intensity,
            Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap(),
        ))
        .expect("create entry")
}

#[test]
fn test_june_2024_scenario() {
    let f = fixture();
    let happy = log(&f.query, Mood::Happy, 7.0, 2024, 6, 1, 8);
    let sad = log(&f.query, Mood::Sad, 3.0, 2024, 6, 1, 20);
    let neutral = log(&f.query, Mood::Neutral, 5.0, 2024, 6, 2, 9);

    let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    assert_eq!(f.query.today_entry_at(&as_of).unwrap(), Some(sad.clone()));

    let june = Period::Month.range_containing(&as_of).unwrap();
    let counts = f.query.counts_by_mood(&june).unwrap();
    assert_eq!(counts.len(), 3);
    assert_eq!(counts.get(&Mood::Happy), Some(&1));
    assert_eq!(counts.get(&Mood::Sad), Some(&1));
    assert_eq!(counts.get(&Mood::Neutral), Some(&1));

    let first_day = TimeRange::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap(),
    )
    .unwrap();
    let listed = f.query.entries_in_range(&first_day).unwrap();
    assert_eq!(listed, vec![sad, happy]);

    let index = f.query.day_mood_index(&f.query.store().list_all().unwrap(), &Utc);
    assert_eq!(
        index.get(&NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()),
        Some(&neutral.mood)
    );
}

#[test]
fn test_counts_sum_to_range_length_for_every_period() {
    let f = fixture();
    let moods = [
        Mood::Happy,
        Mood::Sad,
        Mood::Sad,
        Mood::Angry,
        Mood::Neutral,
        Mood::Happy,
    ];
    for (i, mood) in moods.into_iter().enumerate() {
        log(&f.query, mood, 5.0, 2024, 6, 1 + (i as u32 * 4), 10);
    }

    let now = Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap();
    for period in [Period::Day, Period::Week, Period::Month, Period::Year] {
        let range = period.range_containing(&now).unwrap();
        let counts = f.query.counts_by_mood(&range).unwrap();
        let listed = f.query.entries_in_range(&range).unwrap();
        assert_eq!(counts.values().sum::<usize>(), listed.len(), "{:?}", period);
        assert!(counts.values().all(|&c| c > 0));
    }
}

#[test]
fn test_trends_segments_follow_counts() {
    let f = fixture();
    log(&f.query, Mood::Happy, 6.0, 2024, 6, 3, 9);
    log(&f.query, Mood::Happy, 8.0, 2024, 6, 4, 9);
    log(&f.query, Mood::Angry, 9.0, 2024, 6, 5, 9);
    log(&f.query, Mood::Sad, 2.0, 2024, 5, 31, 9);

    let now = Utc.with_ymd_and_hms(2024, 6, 5, 18, 0, 0).unwrap();
    let trends = f.query.trends(Period::Week, &now).unwrap();

    assert_eq!(trends.total, 3);
    assert_eq!(trends.segments.len(), 2);
    assert_eq!(trends.segments[0].mood, Mood::Happy);
    assert_eq!(trends.segments[0].count, 2);
    assert_eq!(trends.segments[0].color, "#FFCC00");
    assert_eq!(trends.segments[1].mood, Mood::Angry);
    assert!((trends.segments[1].start_fraction - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_search_property_case_and_empty_query() {
    let f = fixture();
    let store = f.query.store();
    let ts = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    store
        .create(NewMoodEntry::new(Mood::Happy, 7.0, ts).with_notes("Beach day"))
        .unwrap();
    store
        .create(NewMoodEntry::new(Mood::Sad, 3.0, ts).with_notes("Not so HAPPY today"))
        .unwrap();
    store.create(NewMoodEntry::new(Mood::Angry, 8.0, ts)).unwrap();

    let scope = store.list_all().unwrap();
    assert_eq!(f.query.search("", &scope, &Utc), scope);
    assert_eq!(
        f.query.search("happy", &scope, &Utc),
        f.query.search("HAPPY", &scope, &Utc)
    );
    assert_eq!(f.query.search("happy", &scope, &Utc).len(), 2);
    assert!(f.query.search("mountain", &scope, &Utc).is_empty());
}

#[test]
fn test_today_in_a_non_utc_timezone() {
    let f = fixture();
    // 2024-06-01 23:30 UTC is 2024-06-02 09:30 in UTC+10
    let late = f
        .query
        .store()
        .create(NewMoodEntry::new(
            Mood::Neutral,
            5.0,
            Utc.with_ymd_and_hms(2024, 6, 1, 23, 30, 0).unwrap(),
        ))
        .unwrap();

    let tz = FixedOffset::east_opt(10 * 3600).unwrap();
    let june_second = tz.with_ymd_and_hms(2024, 6, 2, 12, 0, 0).unwrap();
    let june_first = tz.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

    assert_eq!(f.query.today_entry_at(&june_second).unwrap(), Some(late));
    assert_eq!(f.query.today_entry_at(&june_first).unwrap(), None);
}

#[test]
fn test_month_grid_overlays_latest_mood() {
    let f = fixture();
    log(&f.query, Mood::Happy, 5.0, 2024, 6, 15, 8);
    log(&f.query, Mood::Angry, 5.0, 2024, 6, 15, 22);

    let grid = f
        .query
        .month_grid(CalendarMonth::new(2024, 6).unwrap(), &Utc)
        .unwrap();

    let fifteenth = grid
        .cells
        .iter()
        .find(|cell| matches!(cell, CalendarCell::Day { day: 15, .. }))
        .unwrap();
    assert!(matches!(
        fifteenth,
        CalendarCell::Day {
            mood: Some(Mood::Angry),
            ..
        }
    ));
}
