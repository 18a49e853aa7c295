//! Date range for filtering events.

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{CalendarError, CalendarResult};

/// Date range for filtering events. Both ends are inclusive.
/// None values mean unbounded in that direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDateTime>, to: Option<NaiveDateTime>) -> Self {
        DateRange { from, to }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Parse date strings into a DateRange.
    /// - `from`: YYYY-MM-DD, taken as the start of that day
    /// - `to`: YYYY-MM-DD, taken as the end of that day
    pub fn from_args(from: Option<&str>, to: Option<&str>) -> CalendarResult<Self> {
        let from = from.map(parse_date_start).transpose()?;
        let to = to.map(parse_date_end).transpose()?;
        Ok(DateRange { from, to })
    }

    /// Get `from`, using a very old date if unbounded.
    pub fn start_or_sentinel(&self) -> NaiveDateTime {
        self.from.unwrap_or_else(|| sentinel(1900))
    }

    /// Get `to`, using a far future date if unbounded.
    pub fn end_or_sentinel(&self) -> NaiveDateTime {
        self.to.unwrap_or_else(|| sentinel(2500))
    }

    pub fn contains(&self, moment: &NaiveDateTime) -> bool {
        *moment >= self.start_or_sentinel() && *moment <= self.end_or_sentinel()
    }
}

/// January 1st of `year` at midnight.
fn sentinel(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn parse_date(s: &str) -> CalendarResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CalendarError::InvalidDate(s.to_string()))
}

/// Parse YYYY-MM-DD as start of day
fn parse_date_start(s: &str) -> CalendarResult<NaiveDateTime> {
    parse_date(s)?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| CalendarError::InvalidDate(s.to_string()))
}

/// Parse YYYY-MM-DD as end of day
fn parse_date_end(s: &str) -> CalendarResult<NaiveDateTime> {
    parse_date(s)?
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| CalendarError::InvalidDate(s.to_string()))
}
