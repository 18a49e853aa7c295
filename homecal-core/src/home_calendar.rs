//! The four calendar reports over one record source.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::aggregate::{
    PivotRow, aggregate_by_category, aggregate_by_month, aggregate_flat, build_pivot,
};
use crate::calendar_item::{CalendarItem, CategoryBucket, MonthBucket};
use crate::date_range::DateRange;
use crate::error::CalendarResult;
use crate::record::{RecordQuery, RecordSource, RowOrder};
use crate::storage::Database;

/// Reports over a [`RecordSource`].
///
/// Every call queries the source again; nothing is cached between calls.
pub struct HomeCalendar<S> {
    source: S,
}

impl HomeCalendar<Database> {
    /// Open a calendar file, creating and seeding it when `create` is set.
    pub fn open(path: impl AsRef<Path>, create: bool) -> CalendarResult<Self> {
        let db = if create {
            Database::create(path)?
        } else {
            Database::open(path)?
        };
        Ok(HomeCalendar::new(db))
    }
}

impl<S: RecordSource> HomeCalendar<S> {
    pub fn new(source: S) -> Self {
        HomeCalendar { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Every event in the range with one running busy-time total.
    ///
    /// The source returns every category; `category_filter` is applied while
    /// aggregating.
    pub fn calendar_items(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category_filter: Option<i64>,
    ) -> CalendarResult<Vec<CalendarItem>> {
        let query = RecordQuery::new(DateRange::new(start, end), RowOrder::StartTime);
        let rows = self.source.joined_rows(&query)?;
        Ok(aggregate_flat(&rows, category_filter))
    }

    pub fn items_by_month(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category_filter: Option<i64>,
    ) -> CalendarResult<Vec<MonthBucket>> {
        let query = RecordQuery::new(DateRange::new(start, end), RowOrder::StartTime)
            .with_category(category_filter);
        let rows = self.source.joined_rows(&query)?;
        Ok(aggregate_by_month(&rows))
    }

    pub fn items_by_category(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category_filter: Option<i64>,
    ) -> CalendarResult<Vec<CategoryBucket>> {
        let query = RecordQuery::new(DateRange::new(start, end), RowOrder::CategoryThenStartTime)
            .with_category(category_filter);
        let rows = self.source.joined_rows(&query)?;
        Ok(aggregate_by_category(&rows))
    }

    /// Month × category pivot, ending with a `TOTALS` row.
    pub fn dictionary_by_category_and_month(
        &self,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        category_filter: Option<i64>,
    ) -> CalendarResult<Vec<PivotRow>> {
        let months = self.items_by_month(start, end, category_filter)?;
        let categories = self.source.categories()?;
        debug!(months = months.len(), categories = categories.len(), "building pivot");
        Ok(build_pivot(&months, &categories))
    }
}
