use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::debug;

use super::schema;
use crate::category::{Category, CategoryType};
use crate::error::{CalendarError, CalendarResult};

/// Category operations on an open calendar.
pub struct Categories<'a> {
    conn: &'a Connection,
}

impl<'a> Categories<'a> {
    pub(super) fn new(conn: &'a Connection) -> Self {
        Categories { conn }
    }

    /// All categories in id order.
    pub fn list(&self) -> CalendarResult<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT Id, Description, TypeId FROM categories ORDER BY Id")?;
        let categories = stmt
            .query_map([], category_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    pub fn get(&self, id: i64) -> CalendarResult<Category> {
        self.conn
            .query_row(
                "SELECT Id, Description, TypeId FROM categories WHERE Id = ?1",
                [id],
                category_from_row,
            )
            .optional()?
            .ok_or(CalendarError::CategoryNotFound(id))
    }

    pub fn exists(&self, id: i64) -> CalendarResult<bool> {
        let found: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE Id = ?1)",
            [id],
            |row| row.get(0),
        )?;
        Ok(found)
    }

    /// Insert a category and return its new id.
    pub fn add(&self, description: &str, kind: CategoryType) -> CalendarResult<i64> {
        let description = validate_description(description)?;

        self.conn.execute(
            "INSERT INTO categories (Description, TypeId) VALUES (?1, ?2)",
            params![description, kind],
        )?;
        let id = self.conn.last_insert_rowid();

        debug!(id, description, %kind, "added category");
        Ok(id)
    }

    /// Returns whether a category with `id` existed and was changed.
    pub fn update(&self, id: i64, description: &str, kind: CategoryType) -> CalendarResult<bool> {
        let description = validate_description(description)?;

        let changed = self.conn.execute(
            "UPDATE categories SET Description = ?1, TypeId = ?2 WHERE Id = ?3",
            params![description, kind, id],
        )?;

        debug!(id, changed, "updated category");
        Ok(changed > 0)
    }

    /// Delete a category together with all of its events.
    pub fn delete(&self, id: i64) -> CalendarResult<bool> {
        let tx = self.conn.unchecked_transaction()?;
        let events = tx.execute("DELETE FROM events WHERE CategoryId = ?1", [id])?;
        let changed = tx.execute("DELETE FROM categories WHERE Id = ?1", [id])?;
        tx.commit()?;

        debug!(id, events, "deleted category");
        Ok(changed > 0)
    }

    /// Throw away every category and event and start over with the defaults.
    pub fn reset_to_defaults(&self) -> CalendarResult<()> {
        schema::reset(self.conn)
    }
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        description: row.get(1)?,
        kind: row.get(2)?,
    })
}

fn validate_description(description: &str) -> CalendarResult<&str> {
    let description = description.trim();
    if description.is_empty() {
        return Err(CalendarError::Invalid(
            "category description cannot be empty".into(),
        ));
    }
    Ok(description)
}
