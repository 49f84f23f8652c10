//! Non-recursive directory listing for selection widgets.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{Error, Result};

/// List the direct children of `root`. Never walks into subdirectories.
///
/// With `directories_only` set, returns subdirectories and ignores the
/// extension filter. Otherwise returns files whose extension is in
/// `extensions`; an empty filter allows every file. Extensions match with
/// or without a leading dot, case-insensitively.
///
/// Entries come back sorted so widget contents are stable across refreshes.
pub async fn list_entries(
    root: impl AsRef<Path>,
    extensions: &[String],
    directories_only: bool,
) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    let allowed: Vec<String> = extensions
        .iter()
        .map(|ext| normalize_extension(ext))
        .filter(|ext| !ext.is_empty())
        .collect();

    let mut entries = match fs::read_dir(root).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(root.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };

    let mut items = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let file_type = entry.file_type().await?;
        if directories_only {
            if file_type.is_dir() {
                items.push(entry.path());
            }
        } else if file_type.is_file() && matches_extension(&entry.path(), &allowed) {
            items.push(entry.path());
        }
    }

    items.sort();
    Ok(items)
}

/// Strip the leading dot and fold case, so ".TXT" and "txt" filter alike.
fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

fn matches_extension(path: &Path, allowed: &[String]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| *a == ext)
        })
        .unwrap_or(false)
}
