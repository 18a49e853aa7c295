//! SQLite storage for categories and events.
//!
//! A calendar lives in a single SQLite file with three tables:
//! `categoryTypes`, `categories` and `events`. Timestamps are stored as
//! `YYYY-MM-DD HH:MM:SS` text so that comparing strings compares times.
//!
//! [`Database`] wraps a `rusqlite::Connection`. It is `Send` but not `Sync`;
//! share it across threads behind a `Mutex` if you need to.

mod categories;
mod events;
mod query;
mod schema;

pub use categories::Categories;
pub use events::Events;
pub use schema::DEFAULT_CATEGORIES;

use std::path::Path;

use chrono::{NaiveDateTime, SubsecRound};
use rusqlite::Connection;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use tracing::{debug, info};

use crate::category::CategoryType;
use crate::error::{CalendarError, CalendarResult};

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Create a fresh calendar file at `path`, replacing any file already
    /// there, and seed it with the default categories.
    pub fn create(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = non_empty(path.as_ref())?;

        if path.exists() {
            debug!(path = %path.display(), "removing existing calendar file");
            std::fs::remove_file(path)?;
        }

        let db = Self::from_connection(Connection::open(path)?)?;
        schema::reset(&db.conn)?;
        info!(path = %path.display(), "created calendar");
        Ok(db)
    }

    /// Open an existing calendar file.
    pub fn open(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = non_empty(path.as_ref())?;

        if !path.exists() {
            return Err(CalendarError::FileNotFound(path.to_path_buf()));
        }

        debug!(path = %path.display(), "opening calendar");
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_or_create(path: impl AsRef<Path>) -> CalendarResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path)
        } else {
            Self::create(path)
        }
    }

    /// A seeded calendar that only lives as long as the value.
    pub fn open_in_memory() -> CalendarResult<Self> {
        let db = Self::from_connection(Connection::open_in_memory()?)?;
        schema::reset(&db.conn)?;
        Ok(db)
    }

    fn from_connection(conn: Connection) -> CalendarResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Database { conn })
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(&self.conn)
    }

    pub fn events(&self) -> Events<'_> {
        Events::new(&self.conn)
    }
}

fn non_empty(path: &Path) -> CalendarResult<&Path> {
    if path.as_os_str().is_empty() {
        Err(CalendarError::MissingFileName)
    } else {
        Ok(path)
    }
}

/// Drop sub-second precision so the stored text is exactly
/// `YYYY-MM-DD HH:MM:SS`.
fn stored_time(moment: NaiveDateTime) -> NaiveDateTime {
    moment.trunc_subsecs(0)
}

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.id()))
    }
}

impl FromSql for CategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let id = i64::column_result(value)?;
        CategoryType::from_id(id).map_err(|_| FromSqlError::OutOfRange(id))
    }
}
