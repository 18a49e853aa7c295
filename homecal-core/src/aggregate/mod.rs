//! Report aggregation over joined rows.
//!
//! Four report shapes are built here:
//! - [`aggregate_flat`]: every item with one running busy-time total
//! - [`aggregate_by_month`]: one bucket per "YYYY/MM"
//! - [`aggregate_by_category`]: one bucket per category description
//! - [`build_pivot`]: month × category sums plus a `TOTALS` row
//!
//! Buckets are found by scanning adjacent rows, not by hashing keys. Callers
//! must hand in rows sorted by the bucket key (see [`RowOrder`]); rows of the
//! same key that are not contiguous end up in separate buckets.
//!
//! [`RowOrder`]: crate::record::RowOrder

mod category;
mod flat;
mod month;
mod pivot;

pub use category::aggregate_by_category;
pub use flat::aggregate_flat;
pub use month::aggregate_by_month;
pub use pivot::{
    CategoryCell, ITEMS_PREFIX, MONTH_KEY, MonthRow, PivotRow, PivotValue, TOTAL_BUSY_TIME_KEY,
    TOTALS_LABEL, TotalsRow, build_pivot,
};

use crate::calendar_item::CalendarItem;
use crate::record::JoinedRow;

/// A contiguous run of rows sharing one key.
struct Run {
    key: String,
    items: Vec<CalendarItem>,
    total_busy_time: f64,
}

impl Run {
    fn new(key: String) -> Self {
        Run {
            key,
            items: Vec::new(),
            total_busy_time: 0.0,
        }
    }
}

/// Split `rows` into runs of adjacent rows with equal `key_of`. Each run keeps
/// a running busy-time total that starts at zero and skips Availability rows;
/// every row still becomes an item, stamped with the total reached so far.
fn contiguous_runs<F>(rows: &[JoinedRow], key_of: F) -> Vec<Run>
where
    F: Fn(&JoinedRow) -> String,
{
    let mut runs = Vec::new();
    let mut current: Option<Run> = None;

    for row in rows {
        let key = key_of(row);

        if current.as_ref().is_some_and(|run| run.key != key) {
            runs.extend(current.take());
        }
        let run = current.get_or_insert_with(|| Run::new(key));

        if row.category_type.counts_as_busy() {
            run.total_busy_time += row.duration_minutes;
        }
        run.items.push(CalendarItem::from_row(row, run.total_busy_time));
    }

    runs.extend(current);
    runs
}


#[cfg(test)]
mod tests {
    use super::test_rows::{event, row};
    use super::*;
    use crate::category::CategoryType;

    #[test]
    fn runs_split_on_key_change() {
        let rows = vec![
            event(1, (2024, 1, 5), 40.0, "A"),
            event(2, (2024, 1, 6), 60.0, "A"),
            event(3, (2024, 1, 7), 30.0, "B"),
        ];
        let runs = contiguous_runs(&rows, |r| r.category_description.clone());
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].key, "A");
        assert_eq!(runs[0].total_busy_time, 100.0);
        assert_eq!(runs[1].key, "B");
        assert_eq!(runs[1].total_busy_time, 30.0);
    }

    #[test]
    fn runs_skip_availability_in_totals_only() {
        let rows = vec![
            event(1, (2024, 1, 5), 40.0, "A"),
            row(2, (2024, 1, 6), 500.0, "A", CategoryType::Availability),
            event(3, (2024, 1, 7), 20.0, "A"),
        ];
        let runs = contiguous_runs(&rows, |_| "all".to_string());
        let busy: Vec<f64> = runs[0].items.iter().map(|i| i.busy_time).collect();
        assert_eq!(busy, vec![40.0, 40.0, 60.0]);
        assert_eq!(runs[0].total_busy_time, 60.0);
    }

    #[test]
    fn non_contiguous_keys_make_separate_runs() {
        let rows = vec![
            event(1, (2024, 1, 5), 10.0, "A"),
            event(2, (2024, 1, 6), 10.0, "B"),
            event(3, (2024, 1, 7), 10.0, "A"),
        ];
        let runs = contiguous_runs(&rows, |r| r.category_description.clone());
        let keys: Vec<&str> = runs.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "A"]);
    }

    #[test]
    fn no_rows_no_runs() {
        assert!(contiguous_runs(&[], |r| r.month_key()).is_empty());
    }
}
