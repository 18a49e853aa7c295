//! Terminal rendering for homecal reports.
//!
//! Extension traits that add colored output to homecal-core types using
//! owo_colors.

use homecal_core::{
    CalendarItem, Category, CategoryBucket, CategoryType, Event, MonthBucket, PivotRow,
};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

/// Minutes as "1h 05m" or "45m". Fractions are rounded to whole minutes.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.round() as i64;
    let (hours, mins) = (total / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {mins:02}m")
    } else {
        format!("{mins}m")
    }
}

fn no_events() -> String {
    "No events found".dimmed().to_string()
}

impl Render for CalendarItem {
    fn render(&self) -> String {
        format!(
            "{} {:<30} {:>8}  {}",
            self.start_date_time.format("%Y-%m-%d %H:%M"),
            self.short_description,
            format_minutes(self.duration_minutes),
            format!("[{}]", self.category).dimmed()
        )
    }
}

impl Render for [CalendarItem] {
    fn render(&self) -> String {
        if self.is_empty() {
            return no_events();
        }

        self.iter()
            .map(|item| {
                format!(
                    "{}  {}",
                    item.render(),
                    format_minutes(item.busy_time).cyan()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A bucket heading followed by its items, each with the running total.
fn render_bucket(label: &str, items: &[CalendarItem], total_busy_time: f64) -> String {
    let mut lines = vec![format!(
        "{}  {}",
        label.bold(),
        format!("busy {}", format_minutes(total_busy_time)).cyan()
    )];
    lines.extend(items.iter().map(|item| {
        format!(
            "  {}  {}",
            item.render(),
            format_minutes(item.busy_time).dimmed()
        )
    }));
    lines.join("\n")
}

impl Render for [MonthBucket] {
    fn render(&self) -> String {
        if self.is_empty() {
            return no_events();
        }

        self.iter()
            .map(|b| render_bucket(&b.month, &b.items, b.total_busy_time))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Render for [CategoryBucket] {
    fn render(&self) -> String {
        if self.is_empty() {
            return no_events();
        }

        self.iter()
            .map(|b| render_bucket(&b.category, &b.items, b.total_busy_time))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Category columns: TOTALS order first, then anything only seen in a month.
fn pivot_columns(rows: &[PivotRow]) -> Vec<String> {
    let mut columns: Vec<String> = rows
        .iter()
        .filter(|row| row.is_totals())
        .flat_map(|row| row.category_names())
        .map(str::to_string)
        .collect();

    for row in rows {
        for name in row.category_names() {
            if !columns.iter().any(|c| c == name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

impl Render for [PivotRow] {
    fn render(&self) -> String {
        if self.iter().all(|row| row.is_totals() && row.category_names().is_empty()) {
            return no_events();
        }

        let columns = pivot_columns(self);
        let widths: Vec<usize> = columns.iter().map(|c| c.len().max(8)).collect();

        let mut header = format!("{:<8} {:>10}", "Month", "Busy");
        for (column, width) in columns.iter().zip(&widths) {
            header.push_str(&format!(" {:>width$}", column, width = width));
        }
        let mut lines = vec![header.bold().to_string()];

        for row in self {
            let busy = row
                .total_busy_time()
                .map(format_minutes)
                .unwrap_or_default();
            let mut line = format!("{:<8} {:>10}", row.month(), busy);
            for (column, width) in columns.iter().zip(&widths) {
                let cell = row
                    .category_total(column)
                    .map(format_minutes)
                    .unwrap_or_else(|| "-".to_string());
                line.push_str(&format!(" {:>width$}", cell, width = width));
            }

            if row.is_totals() {
                lines.push(line.bold().to_string());
            } else {
                lines.push(line);
            }
        }

        lines.join("\n")
    }
}

impl Render for CategoryType {
    fn render(&self) -> String {
        match self {
            CategoryType::Event => self.name().green().to_string(),
            CategoryType::AllDayEvent => self.name().blue().to_string(),
            CategoryType::Holiday => self.name().magenta().to_string(),
            CategoryType::Availability => self.name().dimmed().to_string(),
        }
    }
}

impl Render for [Category] {
    fn render(&self) -> String {
        if self.is_empty() {
            return "No categories".dimmed().to_string();
        }

        self.iter()
            .map(|c| format!("{:>4}  {:<24} {}", c.id, c.description, c.kind.render()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Render for [Event] {
    fn render(&self) -> String {
        if self.is_empty() {
            return no_events();
        }

        self.iter()
            .map(|e| {
                format!(
                    "{:>4}  {} {:>8}  {}  {}",
                    e.id,
                    e.start_date_time.format("%Y-%m-%d %H:%M"),
                    format_minutes(e.duration_minutes),
                    e.details,
                    format!("(category {})", e.category_id).dimmed()
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_format() {
        assert_eq!(format_minutes(0.0), "0m");
        assert_eq!(format_minutes(45.0), "45m");
        assert_eq!(format_minutes(65.0), "1h 05m");
        assert_eq!(format_minutes(1440.0), "24h 00m");
        assert_eq!(format_minutes(29.6), "30m");
    }

    #[test]
    fn empty_reports_say_so() {
        let items: &[CalendarItem] = &[];
        assert!(items.render().contains("No events found"));

        let pivot = vec![PivotRow::Totals(Default::default())];
        assert!(pivot.as_slice().render().contains("No events found"));
    }
}
