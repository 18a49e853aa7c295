//! Global homecal configuration.

use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

static DEFAULT_CALENDAR_FILE: &str = "~/homecal.db";

fn default_calendar_file() -> PathBuf {
    PathBuf::from(DEFAULT_CALENDAR_FILE)
}

fn is_default_calendar_file(p: &PathBuf) -> bool {
    *p == default_calendar_file()
}

/// Global configuration at ~/.config/homecal/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HomecalConfig {
    #[serde(
        default = "default_calendar_file",
        skip_serializing_if = "is_default_calendar_file"
    )]
    pub calendar_file: PathBuf,
}

impl Default for HomecalConfig {
    fn default() -> Self {
        HomecalConfig {
            calendar_file: default_calendar_file(),
        }
    }
}

impl HomecalConfig {
    /// Load the config file, writing a commented default one first if none
    /// exists yet.
    pub fn load() -> CalendarResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn parse(contents: &str) -> CalendarResult<Self> {
        Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .map_err(|e| CalendarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalendarError::Config(e.to_string()))
    }

    pub fn config_path() -> CalendarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalendarError::Config("Could not determine config directory".into()))?
            .join("homecal");

        Ok(config_dir.join("config.toml"))
    }

    /// The calendar file with `~` expanded.
    pub fn calendar_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.calendar_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn save_to(&self, path: &Path) -> CalendarResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| CalendarError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CalendarResult<()> {
        let contents = format!(
            "\
# homecal configuration

# The SQLite file holding your categories and events:
# calendar_file = \"{}\"
",
            DEFAULT_CALENDAR_FILE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CalendarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CalendarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
