//! Error types for homecal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in calendar operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No calendar file name was specified")]
    MissingFileName,

    #[error("Calendar file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("No category with id {0} exists")]
    CategoryNotFound(i64),

    #[error("Unknown category type id: {0}")]
    UnknownCategoryType(i64),

    #[error(
        "Unknown category type '{0}'. Expected one of: event, all-day-event, holiday, availability"
    )]
    UnknownCategoryName(String),

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calendar operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
