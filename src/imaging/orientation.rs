//! EXIF orientation lookup and correction.
//!
//! Orientation reading is best-effort: [`read_orientation`] reports why a tag
//! could not be read, [`orientation_or_default`] turns any failure into the
//! upright code `1` so a thumbnail always renders.

use super::ImagingError;
use image::DynamicImage;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

/// Orientation code for an image that needs no correction.
pub const UPRIGHT: u16 = 1;

/// Which orientation table thumbnails are corrected with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationMode {
    /// Only codes 2, 6 and 8 are acted on: 8 turns 90° counter-clockwise,
    /// 2 turns 180°, 6 turns 90° clockwise. Mirrored codes are left alone.
    #[default]
    Legacy,
    /// All eight EXIF orientations, including the mirrored ones.
    Full,
}

impl FromStr for OrientationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(OrientationMode::Legacy),
            "full" => Ok(OrientationMode::Full),
            other => Err(format!("unknown orientation mode `{}`", other)),
        }
    }
}

impl fmt::Display for OrientationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrientationMode::Legacy => f.write_str("legacy"),
            OrientationMode::Full => f.write_str("full"),
        }
    }
}

/// Reads the primary image's orientation tag.
pub fn read_orientation(path: &Path) -> Result<u16, ImagingError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;
    let field = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .ok_or(ImagingError::MissingOrientation)?;
    field
        .value
        .get_uint(0)
        .and_then(|v| u16::try_from(v).ok())
        .ok_or(ImagingError::MissingOrientation)
}

/// Like [`read_orientation`], but logs failures and falls back to [`UPRIGHT`].
pub fn orientation_or_default(path: &Path) -> u16 {
    match read_orientation(path) {
        Ok(orientation) => {
            tracing::debug!("exif orientation {} for {}", orientation, path.display());
            orientation
        }
        Err(err) => {
            tracing::debug!(
                "no usable orientation for {}, assuming upright: {}",
                path.display(),
                err
            );
            UPRIGHT
        }
    }
}

pub fn apply_orientation(
    img: DynamicImage,
    orientation: u16,
    mode: OrientationMode,
) -> DynamicImage {
    match mode {
        OrientationMode::Legacy => match orientation {
            8 => img.rotate270(),
            2 => img.rotate180(),
            6 => img.rotate90(),
            _ => img,
        },
        OrientationMode::Full => match orientation {
            2 => img.fliph(),
            3 => img.rotate180(),
            4 => img.flipv(),
            // transpose
            5 => img.rotate90().fliph(),
            6 => img.rotate90(),
            // transverse
            7 => img.rotate270().fliph(),
            8 => img.rotate270(),
            _ => img,
        },
    }
}
