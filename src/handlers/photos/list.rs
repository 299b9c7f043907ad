use super::types::FileDescriptor;
use crate::error::AppError;
use crate::imaging::{read_exif_tags, ImagingError};
use crate::state::AppState;
use crate::utils::path::resolve_path;
use std::path::PathBuf;
use tokio::fs;

/// Lists the immediate children of `request_path` (relative to the storage
/// root, empty or ending with `/`). Photos get their EXIF tags attached when
/// they decode; entries that fail along the way are logged, never fatal.
pub async fn list_directory(
    state: &AppState,
    request_path: &str,
) -> Result<Vec<FileDescriptor>, AppError> {
    let dir = resolve_path(&state.config.storage_path, request_path)?;

    let metadata = fs::metadata(&dir).await?;
    if !metadata.is_dir() {
        return Err(AppError::NotFound(format!(
            "not a directory: {}",
            request_path
        )));
    }

    let mut entries = fs::read_dir(&dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().to_string();

        let metadata = match entry.metadata().await {
            Ok(metadata) => metadata,
            Err(err) => {
                tracing::warn!("skipping {}: {}", entry.path().display(), err);
                continue;
            }
        };

        let mut descriptor = FileDescriptor::new(name, &metadata, request_path);
        if descriptor.is_photo {
            descriptor.exif = load_exif(entry.path()).await;
        }
        files.push(descriptor);
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

async fn load_exif(path: PathBuf) -> Option<crate::imaging::ExifTags> {
    let shown = path.display().to_string();
    match tokio::task::spawn_blocking(move || read_exif_tags(&path)).await {
        Ok(Ok(tags)) => Some(tags),
        Ok(Err(ImagingError::Exif(exif::Error::NotFound(_)))) => {
            tracing::debug!("no EXIF in {}", shown);
            None
        }
        Ok(Err(err)) => {
            tracing::warn!("unreadable EXIF in {}: {}", shown, err);
            None
        }
        Err(err) => {
            tracing::warn!("EXIF task for {} failed: {}", shown, err);
            None
        }
    }
}
