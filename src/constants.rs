//! Constants used throughout the application.
//!
//! This module contains all constants used in moodlog, organized into
//! logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A daily mood journal with trends and reminders";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Log level used when `--verbose` is passed.
pub const VERBOSE_LOG_LEVEL: &str = "debug";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the database file.
pub const ENV_VAR_MOODLOG_DB: &str = "MOODLOG_DB";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default database location relative to the user's home directory.
pub const DEFAULT_DB_SUBPATH: &str = ".moodlog/moodlog.db";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Database
/// Maximum pooled connections for a file-backed database.
pub const DB_POOL_MAX_SIZE: u32 = 4;
/// Milliseconds SQLite waits on a locked database before failing.
pub const DB_BUSY_TIMEOUT_MS: u32 = 5000;
/// Seconds to wait for a pooled connection before giving up.
pub const DB_POOL_CONNECTION_TIMEOUT_SECS: u64 = 5;

// Mood Entries
/// Lowest storable intensity.
pub const INTENSITY_MIN: f32 = 0.0;
/// Highest storable intensity.
pub const INTENSITY_MAX: f32 = 10.0;
/// Intensity used when none is given.
pub const DEFAULT_INTENSITY: f32 = 5.0;
/// Number of characters of a note shown in list rows.
pub const NOTES_PREVIEW_CHARS: usize = 30;
/// Suffix appended to truncated note previews.
pub const NOTES_PREVIEW_ELLIPSIS: &str = "...";
/// Text shown when nothing has been logged today.
pub const NO_MOOD_LOGGED_TEXT: &str = "<No mood logged yet>";

// Date/Time Logic
/// Date format string for ISO date format (YYYY-MM-DD).
pub const DATE_FORMAT_ISO: &str = "%Y-%m-%d";
/// Month format accepted by the calendar command (YYYY-MM).
pub const MONTH_FORMAT_ISO: &str = "%Y-%m";
/// Local date-time formats accepted for backdated entries.
pub const DATETIME_INPUT_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];
/// Medium date style used for display and search ("Jun 1, 2024").
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";
/// Time-of-day format used for reminders.
pub const REMINDER_TIME_FORMAT: &str = "%H:%M";
/// Default reminder hour (local time).
pub const DEFAULT_REMINDER_HOUR: u32 = 20;
/// Header used when rendering a calendar month.
pub const CALENDAR_HEADER_FORMAT: &str = "%B %Y";
/// Number of cells in a calendar month grid (6 weeks of 7 days).
pub const CALENDAR_GRID_CELLS: usize = 42;
/// Days per calendar week.
pub const DAYS_PER_WEEK: usize = 7;

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodlog";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
