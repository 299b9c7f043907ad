use crate::imaging::ExifTags;
use crate::utils::common::{encode_url_path, has_photo_extension};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::Metadata;
use std::time::UNIX_EPOCH;

/// One directory entry as returned by a listing.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    pub mode: u32,
    pub mod_time: DateTime<Utc>,
    pub is_dir: bool,
    pub is_photo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<ExifTags>,
    #[serde(rename = "img")]
    pub url: String,
    #[serde(rename = "thumb")]
    pub thumb_url: String,
}

impl FileDescriptor {
    /// `request_path` is the listed directory relative to the storage root,
    /// empty or ending with `/`.
    pub fn new(name: String, metadata: &Metadata, request_path: &str) -> Self {
        let is_dir = metadata.is_dir();
        let mod_time = DateTime::<Utc>::from(metadata.modified().unwrap_or(UNIX_EPOCH));

        Self {
            is_photo: !is_dir && has_photo_extension(&name),
            url: encode_url_path(&format!("/photos/{}{}", request_path, name)),
            thumb_url: encode_url_path(&format!("/thumbnail/{}{}", request_path, name)),
            name,
            size: metadata.len(),
            mode: file_mode(metadata),
            mod_time,
            is_dir,
            exif: None,
        }
    }
}

#[cfg(unix)]
fn file_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn file_mode(_metadata: &Metadata) -> u32 {
    0
}
