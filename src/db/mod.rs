//! Database operations for mood entries and reminder settings.
//!
//! This module provides SQLite-backed storage for the mood journal. It uses
//! connection pooling via r2d2 so the store can be shared by reference
//! between the query service and the command handlers.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry CRUD operations
//! - `settings`: Reminder settings row
//! - `store`: The `MoodStore` trait and its implementation for `Database`
//!
//! # Example
//!
//! ```no_run
//! use moodlog::db::{Database, MoodStore};
//! use moodlog::mood_core::{Mood, NewMoodEntry};
//! use chrono::Utc;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/moodlog.db"))?;
//! db.initialize_schema()?;
//! let entry = db.create(NewMoodEntry::new(Mood::Happy, 7.0, Utc::now()))?;
//! println!("Logged entry {}", entry.id);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod entries;
pub mod schema;
pub mod settings;
pub mod store;

pub use settings::ReminderSettings;
pub use store::MoodStore;

use crate::constants::{DB_BUSY_TIMEOUT_MS, DB_POOL_CONNECTION_TIMEOUT_SECS, DB_POOL_MAX_SIZE};
use crate::errors::{AppResult, DatabaseError};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
///
/// Every mutating call commits before it returns, so a successful return
/// means the change is on disk.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates a SQLite database file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Database file cannot be opened or is not a SQLite database
    /// - Connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        // A pool built over a file that is not SQLite would retry the failing
        // pragmas until the checkout timeout, so check the file directly first
        let check_conn = Connection::open(db_path).map_err(DatabaseError::Sqlite)?;
        check_conn
            .query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| {
                row.get::<_, i64>(0)
            })
            .map_err(DatabaseError::Sqlite)?;
        drop(check_conn);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_MAX_SIZE)
            .connection_timeout(Duration::from_secs(DB_POOL_CONNECTION_TIMEOUT_SECS))
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Opens a private in-memory database.
    ///
    /// The pool holds exactly one connection that never expires, because
    /// each SQLite in-memory connection is its own database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection pool cannot be initialized.
    pub fn open_in_memory() -> AppResult<Self> {
        debug!("Opening in-memory database");

        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(ConnectionPragmas))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool.get().map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Creates all necessary tables and indexes if they don't exist.
    /// This is idempotent and safe to call multiple times.
    ///
    /// # Errors
    ///
    /// Returns an error if schema creation fails.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    /// Loads the saved reminder settings, or the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row cannot be read.
    pub fn reminder_settings(&self) -> AppResult<ReminderSettings> {
        let conn = self.get_conn()?;
        settings::load_reminder_settings(&conn)
    }

    /// Replaces the saved reminder settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings row cannot be written.
    pub fn save_reminder_settings(&self, reminder: &ReminderSettings) -> AppResult<()> {
        let conn = self.get_conn()?;
        settings::save_reminder_settings(&conn, reminder)?;
        info!("Reminder settings saved");
        Ok(())
    }
}

/// Connection customizer that applies durability pragmas to every connection.
#[derive(Debug)]
struct ConnectionPragmas;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionPragmas {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        // Commits reach the disk before a write call returns
        conn.pragma_update(None, "synchronous", "FULL")?;
        conn.busy_timeout(Duration::from_millis(u64::from(DB_BUSY_TIMEOUT_MS)))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}
