//! Image side of the server: EXIF reading, orientation correction and the
//! thumbnail pipeline.
//!
//! Everything in here is synchronous and CPU or disk bound. Handlers call
//! into it through `tokio::task::spawn_blocking`.

pub mod exif_tags;
pub mod orientation;
pub mod thumbnail;

use thiserror::Error;

pub use exif_tags::{read_exif_tags, ExifTags};
pub use orientation::{apply_orientation, orientation_or_default, OrientationMode};
pub use thumbnail::{generate_thumbnail, ThumbnailOptions};

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode image: {0}")]
    Decode(image::ImageError),
    #[error("failed to read EXIF: {0}")]
    Exif(#[from] exif::Error),
    #[error("no orientation tag")]
    MissingOrientation,
    #[error("resize failed: {0}")]
    Resize(String),
    #[error("failed to encode JPEG: {0}")]
    Encode(image::ImageError),
}
