use anyhow::Result;
use homecal_core::{Database, DateRange, HomeCalendar};
use serde::Serialize;

use crate::render::Render;

#[derive(Debug, Clone, Copy)]
pub enum Report {
    Items,
    Months,
    Categories,
    Pivot,
}

pub fn run(
    calendar: &HomeCalendar<Database>,
    report: Report,
    range: DateRange,
    category: Option<i64>,
    json: bool,
) -> Result<()> {
    let (start, end) = (range.from, range.to);

    match report {
        Report::Items => {
            let items = calendar.calendar_items(start, end, category)?;
            print(items.as_slice(), json)
        }
        Report::Months => {
            let months = calendar.items_by_month(start, end, category)?;
            print(months.as_slice(), json)
        }
        Report::Categories => {
            let buckets = calendar.items_by_category(start, end, category)?;
            print(buckets.as_slice(), json)
        }
        Report::Pivot => {
            let rows = calendar.dictionary_by_category_and_month(start, end, category)?;
            print(rows.as_slice(), json)
        }
    }
}

pub fn print<T: Serialize + Render + ?Sized>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value.render());
    }
    Ok(())
}
