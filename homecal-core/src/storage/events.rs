use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use super::{Categories, stored_time};
use crate::error::{CalendarError, CalendarResult};
use crate::event::Event;

const SELECT_EVENT: &str =
    "SELECT Id, StartDateTime, DurationInMinutes, Details, CategoryId FROM events";

/// Event operations on an open calendar.
pub struct Events<'a> {
    conn: &'a Connection,
}

impl<'a> Events<'a> {
    pub(super) fn new(conn: &'a Connection) -> Self {
        Events { conn }
    }

    /// All events in id order.
    pub fn list(&self) -> CalendarResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_EVENT} ORDER BY Id"))?;
        let events = stmt
            .query_map([], event_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(events)
    }

    pub fn get(&self, id: i64) -> CalendarResult<Option<Event>> {
        let event = self
            .conn
            .query_row(&format!("{SELECT_EVENT} WHERE Id = ?1"), [id], event_from_row)
            .optional()?;
        Ok(event)
    }

    /// Insert an event and return its new id.
    pub fn add(
        &self,
        start: NaiveDateTime,
        category_id: i64,
        duration_minutes: f64,
        details: &str,
    ) -> CalendarResult<i64> {
        let details = self.validate(details, duration_minutes, category_id)?;

        self.conn.execute(
            "INSERT INTO events (StartDateTime, DurationInMinutes, Details, CategoryId)
             VALUES (?1, ?2, ?3, ?4)",
            params![stored_time(start), duration_minutes, details, category_id],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!(id, %start, category_id, duration_minutes, "added event");
        Ok(id)
    }

    /// Returns whether an event with `id` existed and was changed.
    pub fn update(
        &self,
        id: i64,
        details: &str,
        start: NaiveDateTime,
        category_id: i64,
        duration_minutes: f64,
    ) -> CalendarResult<bool> {
        let details = self.validate(details, duration_minutes, category_id)?;

        let changed = self.conn.execute(
            "UPDATE events
             SET StartDateTime = ?1, DurationInMinutes = ?2, Details = ?3, CategoryId = ?4
             WHERE Id = ?5",
            params![stored_time(start), duration_minutes, details, category_id, id],
        )?;

        debug!(id, changed, "updated event");
        Ok(changed > 0)
    }

    pub fn delete(&self, id: i64) -> CalendarResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE Id = ?1", [id])?;

        debug!(id, changed, "deleted event");
        Ok(changed > 0)
    }

    fn validate<'d>(
        &self,
        details: &'d str,
        duration_minutes: f64,
        category_id: i64,
    ) -> CalendarResult<&'d str> {
        let details = details.trim();
        if details.is_empty() {
            return Err(CalendarError::Invalid("event details cannot be empty".into()));
        }
        if !duration_minutes.is_finite() || duration_minutes < 0.0 {
            return Err(CalendarError::Invalid(format!(
                "duration must be a number of minutes >= 0, got {duration_minutes}"
            )));
        }
        if !Categories::new(self.conn).exists(category_id)? {
            return Err(CalendarError::Invalid(format!(
                "no category with id {category_id}"
            )));
        }
        Ok(details)
    }
}

fn event_from_row(row: &Row<'_>) -> rusqlite::Result<Event> {
    Ok(Event {
        id: row.get(0)?,
        start_date_time: row.get(1)?,
        duration_minutes: row.get(2)?,
        details: row.get(3)?,
        category_id: row.get(4)?,
    })
}
