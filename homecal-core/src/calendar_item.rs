//! Report items: an event joined with its category.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::record::JoinedRow;

/// One event as it appears in a report.
///
/// `busy_time` is not the item's own duration. It is the running total the
/// producing aggregator had reached when it emitted this item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarItem {
    pub event_id: i64,
    pub category_id: i64,
    pub category: String,
    pub start_date_time: NaiveDateTime,
    pub short_description: String,
    pub duration_minutes: f64,
    pub busy_time: f64,
}

impl CalendarItem {
    pub fn from_row(row: &JoinedRow, busy_time: f64) -> Self {
        CalendarItem {
            event_id: row.event_id,
            category_id: row.category_id,
            category: row.category_description.clone(),
            start_date_time: row.start_date_time,
            short_description: row.details.clone(),
            duration_minutes: row.duration_minutes,
            busy_time,
        }
    }
}

/// All items of one calendar month, keyed "YYYY/MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthBucket {
    pub month: String,
    pub items: Vec<CalendarItem>,
    pub total_busy_time: f64,
}

/// All items sharing one category description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBucket {
    pub category: String,
    pub items: Vec<CalendarItem>,
    pub total_busy_time: f64,
}
