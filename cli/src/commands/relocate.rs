//! Move command - archive a folder under a timestamped name.

use std::path::Path;

use anyhow::Result;
use panelkit_core::move_folder;

pub async fn run(
    source_root: &Path,
    name: &Path,
    destination_root: &Path,
    json: bool,
) -> Result<()> {
    let destination = move_folder(source_root, name, destination_root).await?;

    if json {
        println!("{}", serde_json::json!({ "movedTo": destination }));
    } else {
        println!("Moved to {}", destination.display());
    }

    Ok(())
}
