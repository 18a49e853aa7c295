//! Month × category pivot.
//!
//! Each month bucket becomes one [`PivotRow::Month`] holding, per category
//! description present that month, the exact sum of item durations and the
//! items themselves. A final [`PivotRow::Totals`] carries the grand total per
//! category across all months.
//!
//! Rows can be read by key the way the report is laid out: `"Month"`,
//! `"TotalBusyTime"`, `<category>` and `"items:" + <category>`. Serializing a
//! row produces a flat object with exactly those keys.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

use crate::calendar_item::{CalendarItem, MonthBucket};
use crate::category::Category;

pub const MONTH_KEY: &str = "Month";
pub const TOTAL_BUSY_TIME_KEY: &str = "TotalBusyTime";
pub const ITEMS_PREFIX: &str = "items:";
pub const TOTALS_LABEL: &str = "TOTALS";

/// One category's share of a month.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCell {
    pub category: String,
    /// Sum of the items' durations, Availability included.
    pub busy_time: f64,
    pub items: Vec<CalendarItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub month: String,
    /// The month bucket's busy total (Availability excluded).
    pub total_busy_time: f64,
    /// Sorted by category description.
    pub categories: Vec<CategoryCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TotalsRow {
    /// (category description, grand total), in category list order.
    pub totals: Vec<(String, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PivotRow {
    Month(MonthRow),
    Totals(TotalsRow),
}

/// A value looked up by key in a pivot row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotValue<'a> {
    Text(&'a str),
    Minutes(f64),
    Items(&'a [CalendarItem]),
}

impl PivotRow {
    /// The "YYYY/MM" label, or "TOTALS" for the last row.
    pub fn month(&self) -> &str {
        match self {
            PivotRow::Month(row) => &row.month,
            PivotRow::Totals(_) => TOTALS_LABEL,
        }
    }

    pub fn is_totals(&self) -> bool {
        matches!(self, PivotRow::Totals(_))
    }

    pub fn total_busy_time(&self) -> Option<f64> {
        match self {
            PivotRow::Month(row) => Some(row.total_busy_time),
            PivotRow::Totals(_) => None,
        }
    }

    pub fn category_total(&self, category: &str) -> Option<f64> {
        match self {
            PivotRow::Month(row) => row
                .categories
                .iter()
                .find(|cell| cell.category == category)
                .map(|cell| cell.busy_time),
            PivotRow::Totals(row) => row
                .totals
                .iter()
                .find(|(name, _)| name == category)
                .map(|(_, total)| *total),
        }
    }

    pub fn category_items(&self, category: &str) -> Option<&[CalendarItem]> {
        match self {
            PivotRow::Month(row) => row
                .categories
                .iter()
                .find(|cell| cell.category == category)
                .map(|cell| cell.items.as_slice()),
            PivotRow::Totals(_) => None,
        }
    }

    /// Category descriptions present in this row, in row order.
    pub fn category_names(&self) -> Vec<&str> {
        match self {
            PivotRow::Month(row) => row.categories.iter().map(|c| c.category.as_str()).collect(),
            PivotRow::Totals(row) => row.totals.iter().map(|(name, _)| name.as_str()).collect(),
        }
    }

    /// Look a value up by its report key.
    pub fn get(&self, key: &str) -> Option<PivotValue<'_>> {
        if key == MONTH_KEY {
            return Some(PivotValue::Text(self.month()));
        }
        if key == TOTAL_BUSY_TIME_KEY {
            return self.total_busy_time().map(PivotValue::Minutes);
        }
        if let Some(category) = key.strip_prefix(ITEMS_PREFIX) {
            return self.category_items(category).map(PivotValue::Items);
        }
        self.category_total(key).map(PivotValue::Minutes)
    }

    /// Every key this row answers to, in serialization order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys = vec![MONTH_KEY.to_string()];
        match self {
            PivotRow::Month(row) => {
                keys.push(TOTAL_BUSY_TIME_KEY.to_string());
                for cell in &row.categories {
                    keys.push(format!("{ITEMS_PREFIX}{}", cell.category));
                    keys.push(cell.category.clone());
                }
            }
            PivotRow::Totals(row) => {
                keys.extend(row.totals.iter().map(|(name, _)| name.clone()));
            }
        }
        keys
    }
}

/// A flat object: `Month`, `TotalBusyTime`, then `items:<category>` and
/// `<category>` for each category, in that order.
///
/// A category named `Month` or `TotalBusyTime` repeats that key in a month
/// row. It comes after the label, so a reader that builds a map keeps the
/// category's value. In the TOTALS row such a category is left out and
/// `Month` stays `"TOTALS"`.
impl Serialize for PivotRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PivotRow::Month(row) => {
                let mut map = serializer.serialize_map(Some(2 + 2 * row.categories.len()))?;
                map.serialize_entry(MONTH_KEY, &row.month)?;
                map.serialize_entry(TOTAL_BUSY_TIME_KEY, &row.total_busy_time)?;
                for cell in &row.categories {
                    map.serialize_entry(&format!("{ITEMS_PREFIX}{}", cell.category), &cell.items)?;
                    map.serialize_entry(&cell.category, &cell.busy_time)?;
                }
                map.end()
            }
            PivotRow::Totals(row) => {
                let totals: Vec<_> = row
                    .totals
                    .iter()
                    .filter(|(name, _)| name != MONTH_KEY)
                    .collect();
                let mut map = serializer.serialize_map(Some(1 + totals.len()))?;
                map.serialize_entry(MONTH_KEY, TOTALS_LABEL)?;
                for (name, total) in totals {
                    map.serialize_entry(name, total)?;
                }
                map.end()
            }
        }
    }
}

/// Build the month × category pivot from month buckets.
///
/// `categories` is the full category list in its natural order; it decides
/// the order of the TOTALS row. Categories without activity in any month are
/// left out of TOTALS rather than shown as zero, and a description already in
/// TOTALS is not added again.
pub fn build_pivot(months: &[MonthBucket], categories: &[Category]) -> Vec<PivotRow> {
    let mut grand_totals: HashMap<&str, f64> = HashMap::new();
    let mut rows = Vec::with_capacity(months.len() + 1);

    for bucket in months {
        let mut groups: BTreeMap<&str, Vec<CalendarItem>> = BTreeMap::new();
        for item in &bucket.items {
            groups
                .entry(item.category.as_str())
                .or_default()
                .push(item.clone());
        }

        let cells = groups
            .into_iter()
            .map(|(category, items)| {
                let busy_time = items.iter().fold(0.0, |sum, item| sum + item.duration_minutes);
                *grand_totals.entry(category).or_insert(0.0) += busy_time;
                CategoryCell {
                    category: category.to_string(),
                    busy_time,
                    items,
                }
            })
            .collect();

        rows.push(PivotRow::Month(MonthRow {
            month: bucket.month.clone(),
            total_busy_time: bucket.total_busy_time,
            categories: cells,
        }));
    }

    let mut totals = TotalsRow::default();
    for category in categories {
        let name = category.description.as_str();
        if totals.totals.iter().any(|(existing, _)| existing == name) {
            continue;
        }
        if let Some(total) = grand_totals.get(name) {
            totals.totals.push((name.to_string(), *total));
        }
    }

    trace!(
        months = months.len(),
        categories = totals.totals.len(),
        "built month/category pivot"
    );
    rows.push(PivotRow::Totals(totals));
    rows
}
