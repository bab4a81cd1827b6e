//! Executes parsed subcommands against the store and query service.
//!
//! Output goes to the supplied writer so commands can be exercised in tests
//! without spawning the binary. Diagnostics go through `tracing`, never to
//! the output writer.

use super::render;
use super::{Command, ReminderAction};
use crate::db::{Database, MoodStore, ReminderSettings};
use crate::errors::{AppResult, ValidationError};
use crate::mood_core::{
    parse_date, parse_datetime, parse_month, parse_time, start_of_day, EntryPatch, MoodEntry,
    NewMoodEntry, TimeRange,
};
use crate::ops::{next_fire_at, reminder_due, CalendarMonth, MoodQueryService};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;
use std::io::Write;
use tracing::{debug, info};

/// Reminder settings together with what an external scheduler needs.
#[derive(Debug, Serialize)]
struct ReminderStatus {
    settings: ReminderSettings,
    next_fire_at: Option<DateTime<Utc>>,
    due: bool,
}

fn print_json<T: Serialize, W: Write>(out: &mut W, value: &T) -> AppResult<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Runs one command as of `now`, interpreting dates in `now`'s timezone.
///
/// # Errors
///
/// Returns whatever the underlying operation fails with, or an I/O error if
/// the output cannot be written.
pub fn run_command<Tz, W>(
    query: &MoodQueryService<Database>,
    command: Command,
    now: &DateTime<Tz>,
    as_json: bool,
    out: &mut W,
) -> AppResult<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    let tz = now.timezone();
    let store = query.store();
    debug!("Running command: {:?}", command);

    match command {
        Command::Log {
            mood,
            intensity,
            note,
            at,
        } => {
            let timestamp = match at {
                Some(input) => parse_datetime(&input, &tz)?,
                None => now.with_timezone(&Utc),
            };
            let mut new_entry = NewMoodEntry::new(mood, intensity, timestamp);
            if let Some(note) = note {
                new_entry = new_entry.with_notes(note);
            }

            let created = store.create(new_entry)?;
            info!("Logged entry {}", created.id);

            if as_json {
                print_json(out, &created)?;
            } else {
                writeln!(
                    out,
                    "Logged entry #{}: {} ({:.1})",
                    created.id, created.mood, created.intensity
                )?;
            }
        }

        Command::Today => {
            let today = query.today_entry_at(now)?;
            if as_json {
                print_json(out, &today)?;
            } else {
                writeln!(out, "{}", render::today_summary(today.as_ref(), &tz))?;
            }
        }

        Command::List { from, to } => {
            let entries = list_between(query, from.as_deref(), to.as_deref(), &tz)?;
            if as_json {
                print_json(out, &entries)?;
            } else {
                writeln!(out, "{}", render::entry_list(&entries, &tz))?;
            }
        }

        Command::Show { id } => {
            let entry = store.get_by_id(id)?;
            if as_json {
                print_json(out, &entry)?;
            } else {
                writeln!(out, "{}", render::entry_detail(&entry, &tz))?;
            }
        }

        Command::Search { query: text } => {
            let matches = query.search_all(&text, &tz)?;
            if as_json {
                print_json(out, &matches)?;
            } else {
                writeln!(out, "{}", render::entry_list(&matches, &tz))?;
            }
        }

        Command::EditNotes { id, notes } => {
            let updated = store.update(id, &EntryPatch::notes(notes))?;
            info!("Updated notes of entry {}", id);
            if as_json {
                print_json(out, &updated)?;
            } else {
                writeln!(out, "Updated entry #{}", updated.id)?;
            }
        }

        Command::Delete { id } => {
            store.delete(id)?;
            info!("Deleted entry {}", id);
            if as_json {
                print_json(out, &json!({ "deleted": id }))?;
            } else {
                writeln!(out, "Deleted entry #{}", id)?;
            }
        }

        Command::Clear { yes } => {
            if !yes {
                return Err(ValidationError::ConfirmationRequired(
                    "delete all entries".to_string(),
                )
                .into());
            }
            let removed = store.delete_all()?;
            info!("Cleared {} entries", removed);
            if as_json {
                print_json(out, &json!({ "deleted": removed }))?;
            } else {
                writeln!(out, "Deleted {} entries", removed)?;
            }
        }

        Command::Trends { period } => {
            let trends = query.trends(period, now)?;
            if as_json {
                print_json(out, &trends)?;
            } else {
                writeln!(out, "{}", render::trends_report(&trends))?;
            }
        }

        Command::Calendar { month } => {
            let month = match month {
                Some(input) => {
                    let (year, month) = parse_month(&input)?;
                    CalendarMonth::new(year, month)?
                }
                None => CalendarMonth::containing(now.date_naive()),
            };
            let grid = query.month_grid(month, &tz)?;
            if as_json {
                print_json(out, &grid)?;
            } else {
                writeln!(out, "{}", render::month_calendar(&grid))?;
            }
        }

        Command::Reminder { action } => {
            let settings = match action.unwrap_or(ReminderAction::Show) {
                ReminderAction::Show => store.reminder_settings()?,
                ReminderAction::Enable { at } => {
                    let mut settings = store.reminder_settings()?;
                    settings.enabled = true;
                    if let Some(input) = at {
                        settings.time = parse_time(&input)?;
                    }
                    store.save_reminder_settings(&settings)?;
                    settings
                }
                ReminderAction::Disable => {
                    let settings = ReminderSettings {
                        enabled: false,
                        ..store.reminder_settings()?
                    };
                    store.save_reminder_settings(&settings)?;
                    settings
                }
            };

            let next = next_fire_at(&settings, now);
            let today = query.today_entry_at(now)?;
            let due = reminder_due(&settings, today.as_ref(), now);

            if as_json {
                let status = ReminderStatus {
                    settings,
                    next_fire_at: next.map(|n| n.with_timezone(&Utc)),
                    due,
                };
                print_json(out, &status)?;
            } else {
                writeln!(out, "{}", render::reminder_status(&settings, next.as_ref()))?;
                if due {
                    writeln!(out, "Nothing logged yet today.")?;
                }
            }
        }
    }

    Ok(())
}

/// Entries between two inclusive local dates. A missing bound is open.
fn list_between<Tz: TimeZone>(
    query: &MoodQueryService<Database>,
    from: Option<&str>,
    to: Option<&str>,
    tz: &Tz,
) -> AppResult<Vec<MoodEntry>> {
    if from.is_none() && to.is_none() {
        return query.store().list_all();
    }

    let start = match from {
        Some(input) => start_of_day(tz, parse_date(input)?)?.with_timezone(&Utc),
        None => DateTime::<Utc>::MIN_UTC,
    };
    let end = match to {
        Some(input) => {
            let last = parse_date(input)?;
            let after = last
                .succ_opt()
                .ok_or(ValidationError::UnrepresentableDate(last))?;
            start_of_day(tz, after)?.with_timezone(&Utc)
        }
        None => DateTime::<Utc>::MAX_UTC,
    };

    query.entries_in_range(&TimeRange::new(start, end)?)
}
