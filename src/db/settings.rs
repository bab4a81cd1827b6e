//! Persisted reminder settings.
//!
//! The reminder configuration lives in a single `settings` row (id = 1). A
//! database with no row yet reads back the defaults.

use crate::constants::{DEFAULT_REMINDER_HOUR, REMINDER_TIME_FORMAT};
use crate::errors::{AppResult, DatabaseError};
use chrono::NaiveTime;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use tracing::debug;

/// Daily reminder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReminderSettings {
    pub enabled: bool,
    /// Local wall-clock time the reminder fires at.
    pub time: NaiveTime,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        ReminderSettings {
            enabled: false,
            time: NaiveTime::from_hms_opt(DEFAULT_REMINDER_HOUR, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

/// Loads the reminder settings, falling back to defaults when none were saved.
///
/// # Errors
///
/// Returns an error if the query fails or the stored time is unreadable.
pub fn load_reminder_settings(conn: &Connection) -> AppResult<ReminderSettings> {
    let row: Option<(bool, String)> = conn
        .query_row(
            "SELECT reminder_enabled, reminder_time FROM settings WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(DatabaseError::Sqlite)?;

    match row {
        Some((enabled, time)) => {
            let time = NaiveTime::parse_from_str(&time, REMINDER_TIME_FORMAT).map_err(|_| {
                DatabaseError::Corrupt(format!("reminder time '{}' is not HH:MM", time))
            })?;
            Ok(ReminderSettings { enabled, time })
        }
        None => {
            debug!("No reminder settings saved, using defaults");
            Ok(ReminderSettings::default())
        }
    }
}

/// Saves the reminder settings, replacing whatever was stored.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn save_reminder_settings(conn: &Connection, settings: &ReminderSettings) -> AppResult<()> {
    debug!(
        "Saving reminder settings: enabled={}, time={}",
        settings.enabled, settings.time
    );

    conn.execute(
        r#"
        INSERT INTO settings (id, reminder_enabled, reminder_time)
        VALUES (1, ?1, ?2)
        ON CONFLICT(id) DO UPDATE SET
            reminder_enabled = excluded.reminder_enabled,
            reminder_time = excluded.reminder_time,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![
            settings.enabled,
            settings.time.format(REMINDER_TIME_FORMAT).to_string()
        ],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    fn setup_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::schema::create_tables(&conn).unwrap();
        conn
    }

    #[test]
    fn test_defaults_when_nothing_saved() {
        let conn = setup_test_db();
        let settings = load_reminder_settings(&conn).unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.time, NaiveTime::from_hms_opt(20, 0, 0).unwrap());
    }

    #[test]
    fn test_save_then_overwrite() {
        let conn = setup_test_db();

        let first = ReminderSettings {
            enabled: true,
            time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
        };
        save_reminder_settings(&conn, &first).unwrap();
        assert_eq!(load_reminder_settings(&conn).unwrap(), first);

        let second = ReminderSettings {
            enabled: false,
            ..first
        };
        save_reminder_settings(&conn, &second).unwrap();
        assert_eq!(load_reminder_settings(&conn).unwrap(), second);

        let rows: i32 = conn
            .query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_unreadable_time_is_corrupt() {
        let conn = setup_test_db();
        conn.execute(
            "INSERT INTO settings (id, reminder_enabled, reminder_time) VALUES (1, 1, 'noon')",
            [],
        )
        .unwrap();

        let result = load_reminder_settings(&conn);
        assert!(matches!(
            result,
            Err(AppError::Database(DatabaseError::Corrupt(_)))
        ));
    }
}
