use std::path::Path;

use anyhow::{Context, Result};
use homecal_core::Database;
use owo_colors::OwoColorize;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists.\n\
            Use `homecal init --force` to replace it (all events will be lost).",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }

    let db = Database::create(path)?;
    let categories = db.categories().list()?;

    println!(
        "{}",
        format!("Created {} with {} categories", path.display(), categories.len()).green()
    );

    Ok(())
}
