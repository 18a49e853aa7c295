//! Calendar events.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A timed event. `category_id` is not checked against the stored
/// categories when the value is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub start_date_time: NaiveDateTime,
    pub duration_minutes: f64,
    pub details: String,
    pub category_id: i64,
}

impl Event {
    pub fn new(
        id: i64,
        start_date_time: NaiveDateTime,
        category_id: i64,
        duration_minutes: f64,
        details: impl Into<String>,
    ) -> Self {
        Event {
            id,
            start_date_time,
            duration_minutes,
            details: details.into(),
            category_id,
        }
    }

    pub fn end_date_time(&self) -> NaiveDateTime {
        let millis = (self.duration_minutes * 60_000.0).round() as i64;
        self.start_date_time + chrono::Duration::milliseconds(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn end_time_adds_fractional_minutes() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let event = Event::new(1, start, 2, 90.5, "Dentist");
        assert_eq!(
            event.end_date_time(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
                .unwrap()
                .and_hms_opt(10, 30, 30)
                .unwrap()
        );
    }
}
