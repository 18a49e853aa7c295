pub mod category;
pub mod event;
pub mod init;
pub mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use homecal_core::{Database, HomeCalendar, HomecalConfig};
use tracing::debug;

/// The calendar file from `--file`, or from the config file.
pub fn calendar_path(file: Option<PathBuf>) -> Result<PathBuf> {
    match file {
        Some(path) => Ok(path),
        None => Ok(HomecalConfig::load()?.calendar_path()),
    }
}

pub fn open_database(file: Option<PathBuf>) -> Result<Database> {
    let path = calendar_path(file)?;
    debug!(path = %path.display(), "opening calendar file");

    Database::open(&path).with_context(|| {
        format!(
            "Could not open calendar {}.\n\
            Create one with:\n  \
            homecal init",
            path.display()
        )
    })
}

pub fn open_calendar(file: Option<PathBuf>) -> Result<HomeCalendar<Database>> {
    Ok(HomeCalendar::new(open_database(file)?))
}
