use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use homecal_core::Database;
use owo_colors::OwoColorize;

use super::report::print;

/// Fields to change on an existing event. `None` keeps the stored value.
pub struct EventChanges {
    pub details: Option<String>,
    pub start: Option<String>,
    pub duration: Option<String>,
    pub category: Option<i64>,
}

pub fn list(db: &Database, json: bool) -> Result<()> {
    let events = db.events().list()?;
    print(events.as_slice(), json)
}

pub fn add(db: &Database, details: &str, start: &str, duration: &str, category: i64) -> Result<()> {
    let start = parse_start(start)?;
    let minutes = parse_duration_minutes(duration)?;

    let id = db.events().add(start, category, minutes, details)?;

    println!(
        "{}",
        format!("  Created event {id}: {} at {}", details.trim(), start.format("%Y-%m-%d %H:%M"))
            .green()
    );
    Ok(())
}

pub fn update(db: &Database, id: i64, changes: EventChanges) -> Result<()> {
    let Some(event) = db.events().get(id)? else {
        anyhow::bail!("No event with id {id}. See `homecal event list`.");
    };

    let details = changes.details.unwrap_or(event.details);
    let start = match changes.start {
        Some(input) => parse_start(&input)?,
        None => event.start_date_time,
    };
    let minutes = match changes.duration {
        Some(input) => parse_duration_minutes(&input)?,
        None => event.duration_minutes,
    };
    let category = changes.category.unwrap_or(event.category_id);

    db.events().update(id, &details, start, category, minutes)?;

    println!("{}", format!("  Updated event {id}").yellow());
    Ok(())
}

pub fn delete(db: &Database, id: i64) -> Result<()> {
    if db.events().delete(id)? {
        println!("{}", format!("  Deleted event {id}").red());
    } else {
        println!("{}", format!("  No event with id {id}").dimmed());
    }
    Ok(())
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            abbrevs
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an event start. Exact timestamps ("2025-03-20 15:00") are tried
/// first, then natural language ("tomorrow 3pm"). A bare date starts at
/// midnight.
fn parse_start(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }

    let expanded = expand_abbreviations(trimmed);
    let dt = fuzzydate::parse(&expanded)
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    if has_time_component(trimmed) {
        Ok(dt)
    } else {
        Ok(dt.date().and_time(chrono::NaiveTime::MIN))
    }
}

/// Check if the user's input string contains time-related tokens.
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();

    if lower.contains("noon") || lower.contains("midnight") {
        return true;
    }

    // "6pm", "6 pm", "11am"
    let bytes = lower.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if (b == b'a' || b == b'p') && bytes.get(i + 1) == Some(&b'm') {
            if i > 0 && bytes[i - 1].is_ascii_digit() {
                return true;
            }
            if i > 1 && bytes[i - 1] == b' ' && bytes[i - 2].is_ascii_digit() {
                return true;
            }
        }
    }

    // HH:MM
    let has_clock = bytes.windows(3).any(|w| {
        w[0].is_ascii_digit() && w[1] == b':' && w[2].is_ascii_digit()
    });
    if has_clock {
        return true;
    }

    // "at 3", "tomorrow at 15"
    lower
        .strip_prefix("at ")
        .or_else(|| lower.find(" at ").map(|pos| &lower[pos + 4..]))
        .is_some_and(|after| after.starts_with(|c: char| c.is_ascii_digit()))
}

/// Parse a duration as minutes: a bare number ("90", "12.5") or a
/// humantime string ("90m", "1h 30m", "2hours").
fn parse_duration_minutes(input: &str) -> Result<f64> {
    let trimmed = input.trim();

    if let Ok(minutes) = trimmed.parse::<f64>() {
        if !minutes.is_finite() || minutes < 0.0 {
            anyhow::bail!("Duration must be a number of minutes >= 0, got \"{}\"", input);
        }
        return Ok(minutes);
    }

    let duration = humantime::parse_duration(trimmed)
        .with_context(|| format!("Could not parse duration: \"{}\"", input))?;
    Ok(duration.as_secs_f64() / 60.0)
}
