//! The row contract between storage and the aggregators.
//!
//! A [`RecordSource`] hands out events already joined with their category,
//! filtered to a date range and sorted the way the caller asks. The
//! aggregators never query storage themselves; they only walk these rows.

use chrono::{Datelike, NaiveDateTime};

use crate::category::{Category, CategoryType};
use crate::date_range::DateRange;
use crate::error::CalendarResult;

/// An event row joined with its category's description and type.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedRow {
    pub event_id: i64,
    pub start_date_time: NaiveDateTime,
    pub duration_minutes: f64,
    pub details: String,
    pub category_id: i64,
    pub category_description: String,
    pub category_type: CategoryType,
}

impl JoinedRow {
    /// The "YYYY/MM" month this row starts in.
    pub fn month_key(&self) -> String {
        format!(
            "{:04}/{:02}",
            self.start_date_time.year(),
            self.start_date_time.month()
        )
    }
}

/// Sort orders a source must support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// Start time ascending.
    #[default]
    StartTime,
    /// Category description ascending, then start time ascending.
    CategoryThenStartTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordQuery {
    pub range: DateRange,
    pub category_id: Option<i64>,
    pub order: RowOrder,
}

impl RecordQuery {
    pub fn new(range: DateRange, order: RowOrder) -> Self {
        RecordQuery {
            range,
            category_id: None,
            order,
        }
    }

    pub fn with_category(mut self, category_id: Option<i64>) -> Self {
        self.category_id = category_id;
        self
    }
}

/// Anything that can produce joined rows and list categories.
pub trait RecordSource {
    /// Rows whose start time lies in `query.range` (inclusive), restricted to
    /// `query.category_id` when set, sorted by `query.order`.
    fn joined_rows(&self, query: &RecordQuery) -> CalendarResult<Vec<JoinedRow>>;

    /// Every known category, in natural (id) order.
    fn categories(&self) -> CalendarResult<Vec<Category>>;
}

/// A source backed by rows already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    rows: Vec<JoinedRow>,
    categories: Vec<Category>,
}

impl MemorySource {
    pub fn new(rows: Vec<JoinedRow>, categories: Vec<Category>) -> Self {
        MemorySource { rows, categories }
    }
}

impl RecordSource for MemorySource {
    fn joined_rows(&self, query: &RecordQuery) -> CalendarResult<Vec<JoinedRow>> {
        let mut rows: Vec<JoinedRow> = self
            .rows
            .iter()
            .filter(|row| query.range.contains(&row.start_date_time))
            .filter(|row| query.category_id.is_none_or(|id| row.category_id == id))
            .cloned()
            .collect();

        match query.order {
            RowOrder::StartTime => rows.sort_by_key(|row| row.start_date_time),
            RowOrder::CategoryThenStartTime => rows.sort_by(|a, b| {
                a.category_description
                    .cmp(&b.category_description)
                    .then(a.start_date_time.cmp(&b.start_date_time))
            }),
        }

        Ok(rows)
    }

    fn categories(&self) -> CalendarResult<Vec<Category>> {
        let mut categories = self.categories.clone();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: i64, day: (i32, u32, u32), category: (i64, &str)) -> JoinedRow {
        JoinedRow {
            event_id: id,
            start_date_time: NaiveDate::from_ymd_opt(day.0, day.1, day.2)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            duration_minutes: 30.0,
            details: format!("event {id}"),
            category_id: category.0,
            category_description: category.1.to_string(),
            category_type: CategoryType::Event,
        }
    }

    fn source() -> MemorySource {
        MemorySource::new(
            vec![
                row(1, (2024, 3, 1), (2, "Work")),
                row(2, (2024, 3, 9), (1, "School")),
                row(3, (2024, 2, 14), (2, "Work")),
                row(4, (2023, 12, 31), (1, "School")),
            ],
            vec![
                Category::new(2, "Work", CategoryType::Event),
                Category::new(1, "School", CategoryType::Event),
            ],
        )
    }

    fn ids(rows: &[JoinedRow]) -> Vec<i64> {
        rows.iter().map(|r| r.event_id).collect()
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(row(1, (987, 4, 2), (1, "x")).month_key(), "0987/04");
        assert_eq!(row(1, (2024, 11, 2), (1, "x")).month_key(), "2024/11");
    }

    #[test]
    fn memory_source_sorts_by_start_time() {
        let query = RecordQuery::new(DateRange::unbounded(), RowOrder::StartTime);
        let rows = source().joined_rows(&query).unwrap();
        assert_eq!(ids(&rows), vec![4, 3, 1, 2]);
    }

    #[test]
    fn memory_source_sorts_by_category_then_start() {
        let query = RecordQuery::new(DateRange::unbounded(), RowOrder::CategoryThenStartTime);
        let rows = source().joined_rows(&query).unwrap();
        assert_eq!(ids(&rows), vec![4, 2, 3, 1]);

        let query = query.with_category(Some(2));
        let rows = source().joined_rows(&query).unwrap();
        assert_eq!(ids(&rows), vec![3, 1]);
    }

    #[test]
    fn memory_source_applies_range() {
        let range = DateRange::from_args(Some("2024-01-01"), Some("2024-02-29")).unwrap();
        let rows = source()
            .joined_rows(&RecordQuery::new(range, RowOrder::StartTime))
            .unwrap();
        assert_eq!(ids(&rows), vec![3]);
    }

    #[test]
    fn memory_source_lists_categories_by_id() {
        let categories = source().categories().unwrap();
        let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
