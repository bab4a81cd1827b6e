//! Error handling utilities for the moodlog application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! The store and query layers surface three kinds of failure to their callers:
//!
//! - `AppError::NotFound` when an entry id does not exist
//! - `AppError::Database` when the underlying storage fails (the storage error family)
//! - `AppError::Validation` when input falls outside its declared domain

use crate::mood_core::EntryId;
use chrono::NaiveDate;
use thiserror::Error;

/// Represents input that falls outside the domain an operation accepts.
///
/// # Examples
///
/// ```
/// use moodlog::errors::ValidationError;
///
/// let error = ValidationError::InvalidMood("excited".to_string());
/// assert!(format!("{}", error).contains("excited"));
/// assert!(format!("{}", error).contains("happy"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The mood is not one of the four known symbols or category names.
    #[error("Unknown mood '{0}'. Use one of: happy, neutral, sad, angry (or 😊 😐 😔 😡)")]
    InvalidMood(String),

    /// Intensity was NaN or infinite and cannot be clamped.
    #[error("Intensity must be a finite number, got {0}")]
    NonFiniteIntensity(f32),

    /// A time range whose start is not strictly before its end.
    #[error("Time range is empty: start {start} is not before end {end}")]
    EmptyRange {
        /// Range start as RFC 3339
        start: String,
        /// Range end as RFC 3339
        end: String,
    },

    /// A calendar date that cannot be represented in the requested timezone.
    #[error("Date {0} cannot be represented in the local timezone")]
    UnrepresentableDate(NaiveDate),

    /// A date or date-time string that could not be parsed.
    #[error("Invalid date '{0}'. Expected YYYY-MM-DD, YYYY-MM or YYYY-MM-DD HH:MM")]
    InvalidDate(String),

    /// An aggregation period other than day, week, month or year.
    #[error("Unknown period '{0}'. Use one of: day, week, month, year")]
    InvalidPeriod(String),

    /// A time-of-day string that could not be parsed.
    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    /// A destructive command was run without its confirmation flag.
    #[error("Refusing to {0} without --yes")]
    ConfirmationRequired(String),
}

/// Represents specific error cases that can occur during database operations.
///
/// This enum is the storage error family: anything that went wrong reading,
/// writing or committing to the local SQLite database.
///
/// # Examples
///
/// ```
/// use moodlog::errors::DatabaseError;
///
/// let error = DatabaseError::Corrupt("row 3 has category 'Sad' for symbol 😊".to_string());
/// assert!(format!("{}", error).contains("row 3"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error(
        "Database error: {0}\n\nIf you're seeing 'file is not a database' errors, \
         the database file may be corrupted or belong to another program."
    )]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error(
        "Failed to get connection from pool: {0}\n\nThis may indicate database connection \
         issues. Try closing other moodlog instances."
    )]
    Pool(#[from] r2d2::Error),

    /// A stored row violates an invariant of the data model.
    #[error("Stored data is inconsistent: {0}")]
    Corrupt(String),
}

/// Represents all possible errors that can occur in the moodlog application.
///
/// This enum is the central error type used across the application, with variants
/// for different error categories. It uses `thiserror` for deriving the `Error` trait
/// implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use moodlog::errors::AppError;
///
/// let error = AppError::Config("Database path is empty".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Database path is empty");
/// ```
///
/// Converting from an IO error:
/// ```
/// use moodlog::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The referenced mood entry does not exist.
    #[error("Mood entry {0} not found")]
    NotFound(EntryId),

    /// Errors related to database operations.
    ///
    /// This variant uses a dedicated DatabaseError type to provide detailed
    /// information about what went wrong with database operations. The
    /// message is the inner error's, which already names the failure.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Input outside the declared domain of an operation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Failure encoding command output as JSON.
    #[error("Failed to encode output as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Returns `true` when the error reports a missing entry.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(DatabaseError::Sqlite(err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Database(DatabaseError::Pool(err))
    }
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodlog::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
