//! Mood entry CRUD operations.
//!
//! This module provides functions for creating, reading, updating, and deleting
//! mood entries in the database. Every function works on a plain connection so
//! it can run inside a transaction or against an in-memory database.

use crate::errors::{AppError, AppResult, DatabaseError};
use crate::mood_core::{EntryId, EntryPatch, Mood, MoodEntry, NewMoodEntry, TimeRange};
use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

const SELECT_COLUMNS: &str =
    "SELECT id, timestamp_ms, mood, mood_category, intensity, notes FROM mood_entries";

/// A row as stored, before the data-model invariants are checked.
#[derive(Debug)]
struct EntryRow {
    id: i64,
    timestamp_ms: i64,
    mood: String,
    mood_category: String,
    intensity: f64,
    notes: Option<String>,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(EntryRow {
            id: row.get(0)?,
            timestamp_ms: row.get(1)?,
            mood: row.get(2)?,
            mood_category: row.get(3)?,
            intensity: row.get(4)?,
            notes: row.get(5)?,
        })
    }
}

impl TryFrom<EntryRow> for MoodEntry {
    type Error = DatabaseError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let mood = Mood::from_symbol(&row.mood).ok_or_else(|| {
            DatabaseError::Corrupt(format!("entry {} has unknown mood '{}'", row.id, row.mood))
        })?;

        if mood.category() != row.mood_category {
            return Err(DatabaseError::Corrupt(format!(
                "entry {} has category '{}' for mood {}",
                row.id,
                row.mood_category,
                mood.symbol()
            )));
        }

        let timestamp = Utc
            .timestamp_millis_opt(row.timestamp_ms)
            .single()
            .ok_or_else(|| {
                DatabaseError::Corrupt(format!(
                    "entry {} has out-of-range timestamp {}",
                    row.id, row.timestamp_ms
                ))
            })?;

        Ok(MoodEntry {
            id: EntryId(row.id),
            timestamp,
            mood,
            intensity: row.intensity as f32,
            notes: row.notes,
        })
    }
}

fn collect_entries(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
) -> AppResult<Vec<MoodEntry>> {
    let mut stmt = conn.prepare(sql).map_err(DatabaseError::Sqlite)?;
    let rows = stmt
        .query_map(params, EntryRow::from_row)
        .map_err(DatabaseError::Sqlite)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(DatabaseError::Sqlite)?;

    rows.into_iter()
        .map(|row| MoodEntry::try_from(row).map_err(AppError::from))
        .collect()
}

/// Inserts a new mood entry and returns it as stored.
///
/// Intensity is clamped into range and the timestamp is truncated to whole
/// milliseconds before the write, so the returned record equals what a later
/// read produces.
///
/// # Errors
///
/// Returns `AppError::Validation` for a non-finite intensity and
/// `AppError::Database` if the insert fails. Nothing is written on error.
pub fn insert_entry(conn: &Connection, entry: NewMoodEntry) -> AppResult<MoodEntry> {
    let entry = entry.normalized()?;
    debug!(
        "Inserting {} entry at {}",
        entry.mood.category(),
        entry.timestamp
    );

    conn.execute(
        r#"
        INSERT INTO mood_entries (timestamp_ms, mood, mood_category, intensity, notes)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![
            entry.timestamp.timestamp_millis(),
            entry.mood.symbol(),
            entry.mood.category(),
            f64::from(entry.intensity),
            entry.notes
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    let id = EntryId(conn.last_insert_rowid());
    debug!("Entry inserted with id {}", id);

    Ok(MoodEntry {
        id,
        timestamp: entry.timestamp,
        mood: entry.mood,
        intensity: entry.intensity,
        notes: entry.notes,
    })
}

/// Retrieves an entry by id.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entry has this id.
pub fn get_entry(conn: &Connection, id: EntryId) -> AppResult<MoodEntry> {
    debug!("Getting entry with id {}", id);

    let row = conn
        .query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id.0],
            EntryRow::from_row,
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?
        .ok_or(AppError::NotFound(id))?;

    Ok(MoodEntry::try_from(row)?)
}

/// Lists entries with `range.start <= timestamp < range.end`, newest first.
///
/// Entries sharing a timestamp are ordered by descending id.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_entries_in_range(conn: &Connection, range: &TimeRange) -> AppResult<Vec<MoodEntry>> {
    debug!("Listing entries from {} to {}", range.start, range.end);

    collect_entries(
        conn,
        &format!(
            "{} WHERE timestamp_ms >= ?1 AND timestamp_ms < ?2 ORDER BY timestamp_ms DESC, id DESC",
            SELECT_COLUMNS
        ),
        params![range.start.timestamp_millis(), range.end.timestamp_millis()],
    )
}

/// Lists every entry, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn list_all_entries(conn: &Connection) -> AppResult<Vec<MoodEntry>> {
    debug!("Listing all entries");

    collect_entries(
        conn,
        &format!("{} ORDER BY timestamp_ms DESC, id DESC", SELECT_COLUMNS),
        [],
    )
}

/// Applies a patch to an entry and returns the updated record.
///
/// Only notes are mutable. An empty patch leaves the entry untouched but
/// still fails for a missing id.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entry has this id.
pub fn update_entry(conn: &Connection, id: EntryId, patch: &EntryPatch) -> AppResult<MoodEntry> {
    debug!("Updating entry {}", id);

    let tx = conn.unchecked_transaction().map_err(DatabaseError::Sqlite)?;

    if let Some(notes) = &patch.notes {
        let rows_affected = tx
            .execute(
                "UPDATE mood_entries SET notes = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
                params![notes, id.0],
            )
            .map_err(DatabaseError::Sqlite)?;

        if rows_affected == 0 {
            return Err(AppError::NotFound(id));
        }
    }

    let updated = get_entry(&tx, id)?;
    tx.commit().map_err(DatabaseError::Sqlite)?;

    debug!("Entry {} updated", id);
    Ok(updated)
}

/// Deletes an entry permanently.
///
/// # Errors
///
/// Returns `AppError::NotFound` if no entry has this id, including when it
/// was already deleted.
pub fn delete_entry(conn: &Connection, id: EntryId) -> AppResult<()> {
    debug!("Deleting entry {}", id);

    let rows_affected = conn
        .execute("DELETE FROM mood_entries WHERE id = ?1", params![id.0])
        .map_err(DatabaseError::Sqlite)?;

    if rows_affected == 0 {
        return Err(AppError::NotFound(id));
    }

    Ok(())
}

/// Deletes every entry and returns how many were removed.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn delete_all_entries(conn: &Connection) -> AppResult<usize> {
    debug!("Deleting all entries");

    let removed = conn
        .execute("DELETE FROM mood_entries", [])
        .map_err(DatabaseError::Sqlite)?;

    debug!("Removed {} entries", removed);
    Ok(removed)
}
