use crate::calendar_item::CalendarItem;
use crate::record::JoinedRow;

/// Every row as an item, in input order, with one running total that is never
/// reset.
///
/// When `category_filter` is set, rows of other categories are skipped before
/// they reach the total. Unlike the grouped reports, Availability rows do add
/// to this total.
pub fn aggregate_flat(rows: &[JoinedRow], category_filter: Option<i64>) -> Vec<CalendarItem> {
    let mut running_total = 0.0;

    rows.iter()
        .filter(|row| category_filter.is_none_or(|id| row.category_id == id))
        .map(|row| {
            running_total += row.duration_minutes;
            CalendarItem::from_row(row, running_total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_rows::{event, row};
    use crate::category::CategoryType;

    #[test]
    fn running_total_accumulates_in_input_order() {
        let rows = vec![
            event(1, (2024, 1, 5), 40.0, "A"),
            event(2, (2024, 1, 20), 60.0, "BB"),
            event(3, (2024, 2, 2), 30.0, "A"),
        ];
        let items = aggregate_flat(&rows, None);

        let ids: Vec<i64> = items.iter().map(|i| i.event_id).collect();
        let busy: Vec<f64> = items.iter().map(|i| i.busy_time).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(busy, vec![40.0, 100.0, 130.0]);
    }

    #[test]
    fn availability_counts_toward_flat_total() {
        let rows = vec![
            event(1, (2024, 1, 5), 40.0, "A"),
            row(2, (2024, 1, 6), 480.0, "Working", CategoryType::Availability),
        ];
        let items = aggregate_flat(&rows, None);
        assert_eq!(items.last().map(|i| i.busy_time), Some(520.0));
    }

    #[test]
    fn filter_skips_other_categories_before_totalling() {
        // test rows use the description length as the category id
        let rows = vec![
            event(1, (2024, 1, 5), 40.0, "A"),
            event(2, (2024, 1, 6), 60.0, "BB"),
            event(3, (2024, 1, 7), 30.0, "A"),
        ];
        let items = aggregate_flat(&rows, Some(1));

        let ids: Vec<i64> = items.iter().map(|i| i.event_id).collect();
        let busy: Vec<f64> = items.iter().map(|i| i.busy_time).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(busy, vec![40.0, 70.0]);
    }

    #[test]
    fn busy_time_never_decreases_and_ends_at_sum() {
        let rows = vec![
            event(1, (2024, 1, 5), 15.0, "A"),
            event(2, (2024, 1, 6), 0.0, "A"),
            row(3, (2024, 1, 7), 45.5, "Off", CategoryType::Availability),
            row(4, (2024, 1, 8), 1440.0, "Trip", CategoryType::AllDayEvent),
        ];
        let items = aggregate_flat(&rows, None);

        assert!(items.windows(2).all(|w| w[0].busy_time <= w[1].busy_time));
        let sum: f64 = rows.iter().map(|r| r.duration_minutes).sum();
        assert_eq!(items.last().map(|i| i.busy_time), Some(sum));
    }

    #[test]
    fn empty_input_gives_empty_list() {
        assert!(aggregate_flat(&[], None).is_empty());
        assert!(aggregate_flat(&[], Some(3)).is_empty());
    }
}
