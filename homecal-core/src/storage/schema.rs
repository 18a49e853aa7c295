use rusqlite::{Connection, params};
use tracing::debug;

use crate::category::CategoryType;
use crate::error::CalendarResult;

/// Categories every new calendar starts with, in insertion order.
pub const DEFAULT_CATEGORIES: [(&str, CategoryType); 12] = [
    ("School", CategoryType::Event),
    ("Work", CategoryType::Event),
    ("Fun", CategoryType::Event),
    ("Medical", CategoryType::Event),
    ("Sleep", CategoryType::Event),
    ("Working", CategoryType::Availability),
    ("On call", CategoryType::Availability),
    ("Canadian Holidays", CategoryType::Holiday),
    ("Vacation", CategoryType::AllDayEvent),
    ("Wellness Days", CategoryType::AllDayEvent),
    ("BirthDays", CategoryType::AllDayEvent),
    ("Non Standard", CategoryType::Event),
];

const DROP_TABLES: &str = "
    DROP TABLE IF EXISTS events;
    DROP TABLE IF EXISTS categories;
    DROP TABLE IF EXISTS categoryTypes;
";

const CREATE_TABLES: &str = "
    CREATE TABLE categoryTypes (
        Id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        Description TEXT
    );
    CREATE TABLE categories (
        Id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        Description TEXT,
        TypeId INTEGER NOT NULL,
        FOREIGN KEY(TypeId) REFERENCES categoryTypes(Id)
    );
    CREATE TABLE events (
        Id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        StartDateTime TEXT,
        DurationInMinutes REAL,
        Details TEXT,
        CategoryId INTEGER NOT NULL,
        FOREIGN KEY(CategoryId) REFERENCES categories(Id)
    );
    CREATE INDEX events_start ON events(StartDateTime);
";

/// Drop every table, recreate the schema and seed it, all in one
/// transaction.
pub(super) fn reset(conn: &Connection) -> CalendarResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(DROP_TABLES)?;
    tx.execute_batch(CREATE_TABLES)?;

    for kind in CategoryType::ALL {
        tx.execute(
            "INSERT INTO categoryTypes (Id, Description) VALUES (?1, ?2)",
            params![kind, kind.name()],
        )?;
    }

    for (description, kind) in DEFAULT_CATEGORIES {
        tx.execute(
            "INSERT INTO categories (Description, TypeId) VALUES (?1, ?2)",
            params![description, kind],
        )?;
    }

    tx.commit()?;
    debug!(
        categories = DEFAULT_CATEGORIES.len(),
        "schema created and seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn
    }

    #[test]
    fn category_type_rows_match_enum_ids() {
        let conn = memory();
        reset(&conn).unwrap();

        let mut stmt = conn
            .prepare("SELECT Id, Description FROM categoryTypes ORDER BY Id")
            .unwrap();
        let rows: Vec<(i64, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            rows,
            vec![
                (1, "Event".to_string()),
                (2, "AllDayEvent".to_string()),
                (3, "Holiday".to_string()),
                (4, "Availability".to_string()),
            ]
        );
    }

    #[test]
    fn reset_discards_existing_events() {
        let conn = memory();
        reset(&conn).unwrap();
        conn.execute(
            "INSERT INTO events (StartDateTime, DurationInMinutes, Details, CategoryId)
             VALUES ('2024-01-01 10:00:00', 30, 'x', 1)",
            [],
        )
        .unwrap();

        reset(&conn).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn unknown_category_type_violates_foreign_key() {
        let conn = memory();
        reset(&conn).unwrap();
        let result = conn.execute(
            "INSERT INTO categories (Description, TypeId) VALUES ('Bad', 9)",
            [],
        );
        assert!(result.is_err());
    }
}
