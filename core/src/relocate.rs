//! Timestamped folder relocation.

use std::path::{Path, PathBuf};

use chrono::Local;
use tokio::fs;
use tracing::info;

use crate::error::{Error, Result};

/// Move `source_root/<name>` to `destination_root/<name>_<timestamp>`.
///
/// `source_name` may be a longer path; only its final component is used.
/// The source must exist and be a directory, otherwise nothing is moved.
/// The destination root is created when missing. The timestamp is local
/// time formatted `YYYYMMDD_HHMMSS`. Returns the final destination path.
pub async fn move_folder(
    source_root: impl AsRef<Path>,
    source_name: impl AsRef<Path>,
    destination_root: impl AsRef<Path>,
) -> Result<PathBuf> {
    let source_name = source_name.as_ref();
    let destination_root = destination_root.as_ref();

    let name = source_name
        .file_name()
        .ok_or_else(|| Error::NotFound(source_name.to_path_buf()))?;
    let source = source_root.as_ref().join(name);

    let metadata = match fs::metadata(&source).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NotFound(source))
        }
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_dir() {
        return Err(Error::NotADirectory(source));
    }

    fs::create_dir_all(destination_root).await?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let destination =
        destination_root.join(format!("{}_{}", name.to_string_lossy(), timestamp));

    // rename is atomic on the same filesystem; a destination on another
    // device rejects it, so fall back to copy plus remove.
    if fs::rename(&source, &destination).await.is_err() {
        copy_dir_recursive(&source, &destination).await?;
        fs::remove_dir_all(&source).await?;
    }

    info!(destination = %destination.display(), "folder moved");
    Ok(destination)
}

async fn copy_dir_recursive(source: &Path, destination: &Path) -> Result<()> {
    fs::create_dir_all(destination).await?;
    let mut entries = fs::read_dir(source).await?;
    while let Some(entry) = entries.next_entry().await? {
        let target = destination.join(entry.file_name());
        if entry.file_type().await?.is_dir() {
            Box::pin(copy_dir_recursive(&entry.path(), &target)).await?;
        } else {
            fs::copy(entry.path(), &target).await?;
        }
    }
    Ok(())
}
