/*!
# Moodlog - A Daily Mood Journal

This file contains the main application flow: it sets up logging, loads the
configuration, opens the database and hands the parsed command to the
command runner.

## Usage

```text
moodlog [OPTIONS] <COMMAND>

Commands:
  log         Log a mood (happy, neutral, sad, angry or the emoji itself)
  today       Show the entry representing today
  list        List entries, newest first
  show        Show one entry in full
  search      Search moods, notes and dates
  edit-notes  Replace the notes of an entry
  delete      Delete one entry
  clear       Delete every entry
  trends      Counts by mood for the current day, week, month or year
  calendar    Show a month with the mood of each day
  reminder    Show or change the daily reminder

Options:
      --log-format <LOG_FORMAT>  Log output format for diagnostics on stderr [default: text]
  -v, --verbose                  Print verbose output
      --json                     Print results as JSON instead of text
```

## Configuration

- `MOODLOG_DB`: The database file (defaults to "~/.moodlog/moodlog.db")
- `RUST_LOG`: Log filter for diagnostics (defaults to "info")
*/

use chrono::Local;
use clap::Parser;
use moodlog::cli::commands::run_command;
use moodlog::cli::CliArgs;
use moodlog::config::Config;
use moodlog::constants::{
    APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME,
    VERBOSE_LOG_LEVEL,
};
use moodlog::db::Database;
use moodlog::errors::AppResult;
use moodlog::ops::MoodQueryService;
use std::io;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Installs the global tracing subscriber writing to stderr.
///
/// `--verbose` forces debug level; otherwise `RUST_LOG` applies, falling
/// back to info.
fn init_tracing(log_format: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_LOG_LEVEL)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }
}

/// The main entry point for the moodlog application.
///
/// 1. Parses command-line arguments
/// 2. Initializes logging inside a root span with a correlation id
/// 3. Loads and validates configuration
/// 4. Opens the database and ensures the schema exists
/// 5. Runs the requested command
///
/// # Errors
///
/// Returns configuration, database, validation and not-found errors from
/// the command; the process exits non-zero with the error printed.
fn main() -> AppResult<()> {
    let args = CliArgs::parse();
    init_tracing(&args.log_format, args.verbose);

    let correlation_id = Uuid::new_v4();
    let root_span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service_name = TRACING_SERVICE_NAME,
        correlation_id = %correlation_id
    );
    let _guard = root_span.enter();

    info!("Starting {}", APP_NAME);
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;
    debug!("Configuration: {:?}", config);
    config.ensure_data_directory_exists()?;

    let db = Database::open(&config.db_path)?;
    db.initialize_schema()?;
    let query = MoodQueryService::new(db);

    let now = Local::now();
    let mut stdout = io::stdout().lock();
    run_command(&query, args.command, &now, args.json, &mut stdout)?;

    info!("Command completed");
    Ok(())
}
