use chrono::{NaiveDateTime, TimeDelta};
use rusqlite::{Row, params};
use tracing::debug;

use super::{Database, stored_time};
use crate::category::Category;
use crate::error::CalendarResult;
use crate::record::{JoinedRow, RecordQuery, RecordSource, RowOrder};

const JOINED_ROWS: &str = "
    SELECT e.Id, e.StartDateTime, e.DurationInMinutes, e.Details,
           e.CategoryId, c.Description, c.TypeId
    FROM events e
    INNER JOIN categories c ON e.CategoryId = c.Id
    WHERE e.StartDateTime >= ?1
      AND e.StartDateTime <= ?2
      AND (?3 IS NULL OR e.CategoryId = ?3)
";

fn order_clause(order: RowOrder) -> &'static str {
    match order {
        RowOrder::StartTime => "ORDER BY e.StartDateTime, e.Id",
        RowOrder::CategoryThenStartTime => "ORDER BY c.Description, e.StartDateTime, e.Id",
    }
}

/// Stored times are whole seconds, so a start bound with a fraction rounds up
/// to the next second and stays inclusive.
fn lower_bound(moment: NaiveDateTime) -> NaiveDateTime {
    let whole = stored_time(moment);
    if whole < moment {
        whole + TimeDelta::seconds(1)
    } else {
        whole
    }
}

impl RecordSource for Database {
    fn joined_rows(&self, query: &RecordQuery) -> CalendarResult<Vec<JoinedRow>> {
        let start = lower_bound(query.range.start_or_sentinel());
        let end = stored_time(query.range.end_or_sentinel());
        debug!(
            %start,
            %end,
            category = ?query.category_id,
            order = ?query.order,
            "querying joined rows"
        );

        let sql = format!("{JOINED_ROWS} {}", order_clause(query.order));
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![start, end, query.category_id], joined_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = rows.len(), "joined rows fetched");
        Ok(rows)
    }

    fn categories(&self) -> CalendarResult<Vec<Category>> {
        Database::categories(self).list()
    }
}

fn joined_from_row(row: &Row<'_>) -> rusqlite::Result<JoinedRow> {
    Ok(JoinedRow {
        event_id: row.get(0)?,
        start_date_time: row.get(1)?,
        duration_minutes: row.get(2)?,
        details: row.get(3)?,
        category_id: row.get(4)?,
        category_description: row.get(5)?,
        category_type: row.get(6)?,
    })
}
