//! Configuration management for the moodlog application.
//!
//! This module handles loading and validating configuration settings from
//! environment variables, with sensible defaults. The only setting is where
//! the journal database lives; reminder preferences are stored in the
//! database itself.
//!
//! # Environment Variables
//!
//! - `MOODLOG_DB`: Path to the database file (defaults to ~/.moodlog/moodlog.db)
//! - `HOME`: Used for expanding the default database path

use crate::constants::{DEFAULT_DB_SUBPATH, ENV_VAR_HOME, ENV_VAR_MOODLOG_DB, REDACTED_PLACEHOLDER};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

#[cfg(unix)]
use crate::constants::DEFAULT_DIR_PERMISSIONS;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Configuration for the moodlog application.
///
/// # Examples
///
/// Creating a configuration manually:
/// ```
/// use moodlog::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/path/to/moodlog.db"),
/// };
/// assert!(config.validate().is_ok());
/// ```
///
/// Loading configuration from environment variables:
/// ```no_run
/// use moodlog::Config;
/// use std::env;
///
/// env::set_var("MOODLOG_DB", "/custom/moods.db");
///
/// let config = Config::load().expect("Failed to load configuration");
/// assert_eq!(config.db_path.to_str(), Some("/custom/moods.db"));
/// ```
#[derive(Clone, PartialEq)]
pub struct Config {
    /// Location of the SQLite database file.
    ///
    /// Loaded from `MOODLOG_DB` with a fallback to `~/.moodlog/moodlog.db`.
    pub db_path: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &REDACTED_PLACEHOLDER)
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables with sensible defaults.
    ///
    /// The path is expanded with `shellexpand`, so `~` and `$VAR` references
    /// work in `MOODLOG_DB`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if:
    /// - The path expansion fails (e.g. an undefined variable)
    /// - The resulting path is empty
    pub fn load() -> AppResult<Self> {
        let raw_path = env::var(ENV_VAR_MOODLOG_DB).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DB_SUBPATH)
        });

        let expanded_path = shellexpand::full(&raw_path)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;

        let db_path = PathBuf::from(expanded_path.into_owned());

        if db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        debug!("Configuration loaded");
        Ok(Config { db_path })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` with one of the following messages:
    /// - "Database path is empty" if the path is empty
    /// - "Database path must be an absolute path" if the path is relative
    pub fn validate(&self) -> AppResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(AppError::Config("Database path is empty".to_string()));
        }

        if !self.db_path.is_absolute() {
            return Err(AppError::Config(
                "Database path must be an absolute path".to_string(),
            ));
        }

        Ok(())
    }

    /// Creates the directory that holds the database if it is missing.
    ///
    /// New directories get owner-only permissions on Unix. An existing
    /// directory is left as it is.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the directory cannot be created or its
    /// permissions cannot be set.
    pub fn ensure_data_directory_exists(&self) -> AppResult<()> {
        let Some(data_dir) = self.db_path.parent() else {
            return Ok(());
        };

        if data_dir.as_os_str().is_empty() || data_dir.exists() {
            return Ok(());
        }

        fs::create_dir_all(data_dir).map_err(|e| {
            AppError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create data directory: {}", e),
            ))
        })?;

        #[cfg(unix)]
        {
            let permissions = fs::Permissions::from_mode(DEFAULT_DIR_PERMISSIONS);
            fs::set_permissions(data_dir, permissions).map_err(|e| {
                AppError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to set secure permissions on data directory: {}", e),
                ))
            })?;
            debug!("Set {:o} permissions on data directory", DEFAULT_DIR_PERMISSIONS);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn with_env<T>(db: Option<&str>, home: Option<&str>, f: impl FnOnce() -> T) -> T {
        let orig_db = env::var(ENV_VAR_MOODLOG_DB).ok();
        let orig_home = env::var(ENV_VAR_HOME).ok();

        match db {
            Some(value) => env::set_var(ENV_VAR_MOODLOG_DB, value),
            None => env::remove_var(ENV_VAR_MOODLOG_DB),
        }
        if let Some(value) = home {
            env::set_var(ENV_VAR_HOME, value);
        }

        let result = f();

        match orig_db {
            Some(value) => env::set_var(ENV_VAR_MOODLOG_DB, value),
            None => env::remove_var(ENV_VAR_MOODLOG_DB),
        }
        match orig_home {
            Some(value) => env::set_var(ENV_VAR_HOME, value),
            None => env::remove_var(ENV_VAR_HOME),
        }
        result
    }

    #[test]
    fn test_debug_impl_redacts_path() {
        let config = Config {
            db_path: PathBuf::from("/home/username/private/moods.db"),
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains(REDACTED_PLACEHOLDER));
        assert!(!debug_output.contains("/home/username/private"));
    }

    #[test]
    #[serial]
    fn test_load_with_custom_path() {
        let temp_dir = tempdir().unwrap();
        let db_path = temp_dir.path().join("moods.db");
        let db_str = db_path.to_string_lossy().to_string();

        let config = with_env(Some(&db_str), None, Config::load).unwrap();
        assert_eq!(config.db_path, db_path);
    }

    #[test]
    #[serial]
    fn test_load_default_path_under_home() {
        let config = with_env(None, Some("/home/tester"), Config::load).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/home/tester/.moodlog/moodlog.db"));
    }

    #[test]
    #[serial]
    fn test_load_expands_tilde() {
        let config = with_env(Some("~/moods.db"), Some("/home/tester"), Config::load).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/home/tester/moods.db"));
    }

    #[test]
    #[serial]
    fn test_load_undefined_variable_fails() {
        let result = with_env(Some("$MOODLOG_SURELY_UNSET_VAR/moods.db"), None, Config::load);
        match result {
            Err(AppError::Config(message)) => assert!(message.contains("Failed to expand path")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_relative_path() {
        let config = Config {
            db_path: PathBuf::from("relative/moods.db"),
        };

        match config.validate() {
            Err(AppError::Config(message)) => {
                assert!(message.contains("must be an absolute path"))
            }
            _ => panic!("Expected Config error about relative path"),
        }
    }

    #[test]
    fn test_validate_empty_path() {
        let config = Config {
            db_path: PathBuf::new(),
        };

        match config.validate() {
            Err(AppError::Config(message)) => assert!(message.contains("Database path is empty")),
            _ => panic!("Expected Config error about empty path"),
        }
    }

    #[test]
    fn test_ensure_data_directory_creates_parent() {
        let temp_dir = tempdir().unwrap();
        let data_dir = temp_dir.path().join("nested").join("moodlog");
        let config = Config {
            db_path: data_dir.join("moodlog.db"),
        };

        assert!(!data_dir.exists());
        config.ensure_data_directory_exists().unwrap();
        assert!(data_dir.is_dir());

        #[cfg(unix)]
        {
            let mode = fs::metadata(&data_dir).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o700);
        }

        // Second call is a no-op
        config.ensure_data_directory_exists().unwrap();
    }
}
