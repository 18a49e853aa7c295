//! Core library for homecal.
//!
//! - `storage`: the SQLite calendar file with category and event CRUD
//! - `record`: the joined-row contract the reports are computed from
//! - `aggregate`: flat, month, category and month × category reports
//! - `home_calendar`: ties a record source to the four reports
//! - `config`: the global config file at ~/.config/homecal/config.toml

pub mod aggregate;
pub mod calendar_item;
pub mod category;
pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod home_calendar;
pub mod record;
pub mod storage;

pub use aggregate::{PivotRow, PivotValue};
pub use calendar_item::{CalendarItem, CategoryBucket, MonthBucket};
pub use category::{Category, CategoryType};
pub use config::HomecalConfig;
pub use date_range::DateRange;
pub use error::{CalendarError, CalendarResult};
pub use event::Event;
pub use home_calendar::HomeCalendar;
pub use record::{JoinedRow, MemorySource, RecordQuery, RecordSource, RowOrder};
pub use storage::Database;
