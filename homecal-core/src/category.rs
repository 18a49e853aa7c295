//! Event categories.
//!
//! Every event points at a category, and the category's type decides whether
//! the event's duration counts as busy time in the grouped reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// What kind of time a category represents.
///
/// The discriminants are the ids stored in the `categoryTypes` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryType {
    Event = 1,
    AllDayEvent = 2,
    Holiday = 3,
    Availability = 4,
}

impl CategoryType {
    pub const ALL: [CategoryType; 4] = [
        CategoryType::Event,
        CategoryType::AllDayEvent,
        CategoryType::Holiday,
        CategoryType::Availability,
    ];

    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn from_id(id: i64) -> CalendarResult<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.id() == id)
            .ok_or(CalendarError::UnknownCategoryType(id))
    }

    pub fn name(self) -> &'static str {
        match self {
            CategoryType::Event => "Event",
            CategoryType::AllDayEvent => "AllDayEvent",
            CategoryType::Holiday => "Holiday",
            CategoryType::Availability => "Availability",
        }
    }

    /// Availability blocks mark free time, so they never count as busy in
    /// the month and category reports.
    pub fn counts_as_busy(self) -> bool {
        self != CategoryType::Availability
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoryType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "event" => Ok(CategoryType::Event),
            "alldayevent" | "allday" => Ok(CategoryType::AllDayEvent),
            "holiday" => Ok(CategoryType::Holiday),
            "availability" => Ok(CategoryType::Availability),
            _ => Err(CalendarError::UnknownCategoryName(s.to_string())),
        }
    }
}

/// A single category. Identity is `id`; `description` is what the reports
/// group by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
}

impl Category {
    pub fn new(id: i64, description: impl Into<String>, kind: CategoryType) -> Self {
        Category {
            id,
            description: description.into(),
            kind,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}
