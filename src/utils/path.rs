use crate::error::AppError;
use std::path::{Component, Path, PathBuf};

pub fn normalize_path(path: &Path) -> PathBuf {
    let mut ret = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) => ret.push(component.as_os_str()),
            Component::RootDir => ret.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                ret.pop();
            }
            Component::Normal(c) => ret.push(c),
        }
    }
    ret
}

/// A request path names a directory listing when it is empty or ends with `/`.
pub fn is_listing_path(request_path: &str) -> bool {
    request_path.is_empty() || request_path.ends_with('/')
}

/// Joins a request path onto `root`. Leading slashes are ignored; any `..`
/// segment is rejected, so the result always stays under `root`.
pub fn resolve_path(root: &Path, request_path: &str) -> Result<PathBuf, AppError> {
    let relative = Path::new(request_path.trim_start_matches('/'));

    for component in relative.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(AppError::BadRequest(format!(
                    "path escapes the storage root: {}",
                    request_path
                )))
            }
            Component::RootDir | Component::Prefix(..) => {
                return Err(AppError::BadRequest(format!(
                    "absolute paths are not allowed: {}",
                    request_path
                )))
            }
        }
    }

    Ok(normalize_path(&root.join(relative)))
}
