use anyhow::Result;
use homecal_core::{CategoryType, Database};
use owo_colors::OwoColorize;

use super::report::print;

pub fn list(db: &Database, json: bool) -> Result<()> {
    let categories = db.categories().list()?;
    print(categories.as_slice(), json)
}

pub fn add(db: &Database, description: &str, kind: CategoryType) -> Result<()> {
    let id = db.categories().add(description, kind)?;
    let category = db.categories().get(id)?;

    println!("{}", format!("  Created category {id}: {category}").green());
    Ok(())
}

pub fn update(db: &Database, id: i64, description: &str, kind: CategoryType) -> Result<()> {
    if !db.categories().update(id, description, kind)? {
        anyhow::bail!("No category with id {id}. See `homecal category list`.");
    }

    println!("{}", format!("  Updated category {id}").yellow());
    Ok(())
}

pub fn delete(db: &Database, id: i64) -> Result<()> {
    if db.categories().delete(id)? {
        println!("{}", format!("  Deleted category {id} and its events").red());
    } else {
        println!("{}", format!("  No category with id {id}").dimmed());
    }
    Ok(())
}

pub fn reset(db: &Database, force: bool) -> Result<()> {
    if !force {
        anyhow::bail!(
            "This deletes every event and category.\n\
            Run `homecal category reset --force` to go ahead."
        );
    }

    db.categories().reset_to_defaults()?;
    println!("{}", "  Restored the default categories".green());
    Ok(())
}
