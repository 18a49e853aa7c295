use chrono::{NaiveDate, NaiveDateTime};
use homecal_core::{CategoryType, Database, DateRange, HomeCalendar, PivotRow};

fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

/// School (1), Work (2), Working (6, Availability), plus a second "Work"
/// category so two ids share one description.
fn calendar(dir: &tempfile::TempDir) -> (HomeCalendar<Database>, i64) {
    let cal = HomeCalendar::open(dir.path().join("home.db"), true).unwrap();
    let db = cal.source();
    let second_work = db.categories().add("Work", CategoryType::Holiday).unwrap();

    let events = db.events();
    events.add(at(1, 8, 9), 1, 50.0, "lecture").unwrap();
    events.add(at(1, 9, 9), 2, 120.0, "meeting").unwrap();
    events.add(at(1, 10, 9), 6, 480.0, "shift").unwrap();
    events.add(at(2, 1, 9), second_work, 30.0, "stat holiday work").unwrap();
    events.add(at(2, 14, 9), 1, 90.0, "lab").unwrap();
    (cal, second_work)
}

#[test]
fn flat_report_counts_everything() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, _) = calendar(&dir);

    let items = cal.calendar_items(None, None, None).unwrap();
    let busy: Vec<f64> = items.iter().map(|i| i.busy_time).collect();
    assert_eq!(busy, vec![50.0, 170.0, 650.0, 680.0, 770.0]);
}

#[test]
fn month_report_skips_availability_in_totals() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, _) = calendar(&dir);

    let months = cal.items_by_month(None, None, None).unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0].month, "2024/01");
    assert_eq!(months[0].items.len(), 3);
    assert_eq!(months[0].total_busy_time, 170.0);
    assert_eq!(months[1].total_busy_time, 120.0);
}

#[test]
fn category_report_merges_shared_descriptions() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, second_work) = calendar(&dir);

    let buckets = cal.items_by_category(None, None, None).unwrap();
    let names: Vec<&str> = buckets.iter().map(|b| b.category.as_str()).collect();
    assert_eq!(names, vec!["School", "Work", "Working"]);

    let work = &buckets[1];
    assert_eq!(work.total_busy_time, 150.0);
    let ids: Vec<i64> = work.items.iter().map(|i| i.category_id).collect();
    assert_eq!(ids, vec![2, second_work]);

    assert_eq!(buckets[2].total_busy_time, 0.0);
}

#[test]
fn category_filter_narrows_every_report() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, _) = calendar(&dir);

    let items = cal.calendar_items(None, None, Some(1)).unwrap();
    assert_eq!(items.last().map(|i| i.busy_time), Some(140.0));

    let months = cal.items_by_month(None, None, Some(1)).unwrap();
    let totals: Vec<f64> = months.iter().map(|m| m.total_busy_time).collect();
    assert_eq!(totals, vec![50.0, 90.0]);
}

#[test]
fn pivot_matches_month_buckets() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, _) = calendar(&dir);

    let range = DateRange::from_args(Some("2024-01-01"), Some("2024-02-29")).unwrap();
    let months = cal.items_by_month(range.from, range.to, None).unwrap();
    let pivot = cal
        .dictionary_by_category_and_month(range.from, range.to, None)
        .unwrap();
    assert_eq!(pivot.len(), months.len() + 1);

    for (row, bucket) in pivot.iter().zip(&months) {
        assert_eq!(row.month(), bucket.month);
        let cell_sum: f64 = row
            .category_names()
            .iter()
            .filter_map(|name| row.category_total(name))
            .sum();
        let item_sum: f64 = bucket.items.iter().map(|i| i.duration_minutes).sum();
        assert_eq!(cell_sum, item_sum);
    }

    let totals = pivot.last().unwrap();
    assert!(matches!(totals, PivotRow::Totals(_)));
    assert_eq!(totals.category_names(), vec!["School", "Work", "Working"]);
    assert_eq!(totals.category_total("School"), Some(140.0));
    assert_eq!(totals.category_total("Work"), Some(150.0));
    assert_eq!(totals.category_total("Working"), Some(480.0));
}

#[test]
fn pivot_serializes_flat_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (cal, _) = calendar(&dir);

    let pivot = cal.dictionary_by_category_and_month(None, None, None).unwrap();
    let json = serde_json::to_value(&pivot).unwrap();

    assert_eq!(json[0]["Month"], "2024/01");
    assert_eq!(json[0]["TotalBusyTime"], 170.0);
    assert_eq!(json[0]["Working"], 480.0);
    assert_eq!(json[0]["items:School"][0]["short_description"], "lecture");
    assert_eq!(json[2]["Month"], "TOTALS");
    assert!(json[2].get("TotalBusyTime").is_none());
}
