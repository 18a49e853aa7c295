use tracing::trace;

use super::contiguous_runs;
use crate::calendar_item::CategoryBucket;
use crate::record::JoinedRow;

/// Group rows into one bucket per category description.
///
/// `rows` must be sorted by category description, then start time. Two
/// categories with the same description share a bucket when their rows are
/// adjacent. Availability rows are listed but not counted.
pub fn aggregate_by_category(rows: &[JoinedRow]) -> Vec<CategoryBucket> {
    let buckets: Vec<CategoryBucket> =
        contiguous_runs(rows, |row| row.category_description.clone())
            .into_iter()
            .map(|run| CategoryBucket {
                category: run.key,
                items: run.items,
                total_busy_time: run.total_busy_time,
            })
            .collect();

    trace!(rows = rows.len(), buckets = buckets.len(), "grouped by category");
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_rows::{event, row};
    use crate::category::CategoryType;

    #[test]
    fn buckets_follow_input_order() {
        let rows = vec![
            event(1, (2024, 2, 1), 30.0, "Fun"),
            event(2, (2024, 1, 1), 15.0, "School"),
            event(3, (2024, 3, 1), 45.0, "School"),
            event(4, (2024, 1, 9), 60.0, "Work"),
        ];
        let buckets = aggregate_by_category(&rows);

        let names: Vec<&str> = buckets.iter().map(|b| b.category.as_str()).collect();
        assert_eq!(names, vec!["Fun", "School", "Work"]);
        assert_eq!(buckets[1].total_busy_time, 60.0);
        let busy: Vec<f64> = buckets[1].items.iter().map(|i| i.busy_time).collect();
        assert_eq!(busy, vec![15.0, 60.0]);
    }

    #[test]
    fn availability_category_has_zero_total() {
        let rows = vec![
            row(1, (2024, 1, 1), 480.0, "Working", CategoryType::Availability),
            row(2, (2024, 1, 2), 480.0, "Working", CategoryType::Availability),
        ];
        let buckets = aggregate_by_category(&rows);

        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].items.len(), 2);
        assert_eq!(buckets[0].total_busy_time, 0.0);
        assert!(buckets[0].items.iter().all(|i| i.busy_time == 0.0));
    }

    #[test]
    fn shared_description_merges_categories() {
        let mut holiday = row(2, (2024, 1, 2), 60.0, "Days", CategoryType::Holiday);
        holiday.category_id = 99;
        let rows = vec![event(1, (2024, 1, 1), 30.0, "Days"), holiday];

        let buckets = aggregate_by_category(&rows);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].total_busy_time, 90.0);
        let ids: Vec<i64> = buckets[0].items.iter().map(|i| i.category_id).collect();
        assert_eq!(ids, vec![4, 99]);
    }

    #[test]
    fn item_count_matches_row_count() {
        let rows = vec![
            event(1, (2024, 1, 1), 1.0, "A"),
            event(2, (2024, 1, 2), 2.0, "B"),
            event(3, (2024, 1, 3), 3.0, "B"),
            event(4, (2024, 1, 4), 4.0, "C"),
        ];
        let total: usize = aggregate_by_category(&rows)
            .iter()
            .map(|b| b.items.len())
            .sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn empty_input_gives_no_buckets() {
        assert!(aggregate_by_category(&[]).is_empty());
    }
}
