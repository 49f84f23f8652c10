//! List command - show directory entries for a selection widget.

use std::path::Path;

use anyhow::Result;
use panelkit_core::list_entries;

pub async fn run(root: &Path, extensions: &[String], dirs: bool, json: bool) -> Result<()> {
    let entries = list_entries(root, extensions, dirs).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No matching entries.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.display());
    }

    Ok(())
}
