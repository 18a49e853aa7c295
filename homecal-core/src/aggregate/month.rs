use tracing::trace;

use super::contiguous_runs;
use crate::calendar_item::MonthBucket;
use crate::record::JoinedRow;

/// Group rows into one bucket per calendar month.
///
/// `rows` must be sorted by start time. A bucket closes whenever the next
/// row's "YYYY/MM" differs from the current one, and its running total starts
/// over from zero. Availability rows are listed but not counted.
pub fn aggregate_by_month(rows: &[JoinedRow]) -> Vec<MonthBucket> {
    let buckets: Vec<MonthBucket> = contiguous_runs(rows, JoinedRow::month_key)
        .into_iter()
        .map(|run| MonthBucket {
            month: run.key,
            items: run.items,
            total_busy_time: run.total_busy_time,
        })
        .collect();

    trace!(rows = rows.len(), buckets = buckets.len(), "grouped by month");
    buckets
}
