//! Thumbnail pipeline: decode, correct orientation, box-filter resize to a
//! target height, encode as JPEG.
//!
//! Nothing is cached. The same source and options always produce the same
//! bytes.

use super::{apply_orientation, orientation_or_default, ImagingError, OrientationMode};
use fast_image_resize as fir;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Height used when the request does not carry a usable one.
pub const DEFAULT_HEIGHT: u32 = 50;

const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOptions {
    pub height: u32,
    pub orientation_mode: OrientationMode,
}

impl ThumbnailOptions {
    /// Interprets the raw `height` query value. Missing, non-numeric, zero
    /// and negative values all mean [`DEFAULT_HEIGHT`]; `max_height` clamps.
    pub fn from_query(
        height: Option<&str>,
        max_height: Option<u32>,
        orientation_mode: OrientationMode,
    ) -> Self {
        let height = height
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|h| u32::try_from(h).ok())
            .filter(|h| *h > 0)
            .unwrap_or(DEFAULT_HEIGHT);
        let height = max_height.map_or(height, |max| height.min(max));

        Self {
            height,
            orientation_mode,
        }
    }
}

pub fn generate_thumbnail(
    path: &Path,
    options: &ThumbnailOptions,
) -> Result<Vec<u8>, ImagingError> {
    let img = decode(path)?;
    let orientation = orientation_or_default(path);
    let img = apply_orientation(img, orientation, options.orientation_mode);
    let resized = resize_to_height(&img, options.height)?;
    tracing::debug!(
        "thumbnail {} -> {}x{} (orientation {})",
        path.display(),
        resized.width(),
        resized.height(),
        orientation
    );
    encode_jpeg(resized)
}

fn decode(path: &Path) -> Result<DynamicImage, ImagingError> {
    image::ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(ImagingError::Decode)
}

/// Width that keeps the aspect ratio of a `width` x `height` image scaled to
/// `target_height`, never less than one pixel.
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    if height == 0 {
        return 1;
    }
    let w = (f64::from(width) * f64::from(target_height) / f64::from(height)).round();
    (w as u32).max(1)
}

fn resize_to_height(img: &DynamicImage, target_h: u32) -> Result<RgbaImage, ImagingError> {
    let source = img.to_rgba8();
    let target_w = scaled_width(source.width(), source.height(), target_h);
    if source.width() == target_w && source.height() == target_h {
        return Ok(source);
    }

    let src_view = fir::images::ImageRef::new(
        source.width(),
        source.height(),
        source.as_raw(),
        fir::PixelType::U8x4,
    )
    .map_err(|e| ImagingError::Resize(e.to_string()))?;
    let mut dst_image = fir::images::Image::new(target_w, target_h, fir::PixelType::U8x4);
    let options =
        fir::ResizeOptions::new().resize_alg(fir::ResizeAlg::Convolution(fir::FilterType::Box));
    let mut resizer = fir::Resizer::new();
    resizer
        .resize(&src_view, &mut dst_image, Some(&options))
        .map_err(|e| ImagingError::Resize(e.to_string()))?;

    RgbaImage::from_raw(target_w, target_h, dst_image.into_vec())
        .ok_or_else(|| ImagingError::Resize("resized buffer has the wrong size".to_string()))
}

fn encode_jpeg(img: RgbaImage) -> Result<Vec<u8>, ImagingError> {
    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgba8(img).to_rgb8();
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    rgb.write_with_encoder(encoder).map_err(ImagingError::Encode)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        insert_orientation, jpeg_bytes, jpeg_with_orientation, split_jpeg, write_file,
    };
    use image::GenericImageView;
    use tempfile::TempDir;

    fn options(height: u32) -> ThumbnailOptions {
        ThumbnailOptions {
            height,
            orientation_mode: OrientationMode::Legacy,
        }
    }

    fn thumbnail_dimensions(bytes: &[u8]) -> (u32, u32) {
        image::load_from_memory(bytes).unwrap().dimensions()
    }

    #[test]
    fn test_height_parsing() {
        let parse = |raw| ThumbnailOptions::from_query(raw, None, OrientationMode::Legacy).height;
        assert_eq!(parse(None), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("abc")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("0")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("-20")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("12.5")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("99999999999")), DEFAULT_HEIGHT);
        assert_eq!(parse(Some("120")), 120);
    }

    #[test]
    fn test_height_ceiling() {
        let opts = ThumbnailOptions::from_query(Some("4000"), Some(800), OrientationMode::Full);
        assert_eq!(opts.height, 800);
        assert_eq!(opts.orientation_mode, OrientationMode::Full);

        let opts = ThumbnailOptions::from_query(Some("200"), Some(800), OrientationMode::Legacy);
        assert_eq!(opts.height, 200);

        let opts =
            ThumbnailOptions::from_query(Some("1000000"), Some(4096), OrientationMode::Legacy);
        assert_eq!(opts.height, 4096);
    }

    #[test]
    fn test_scaled_width() {
        assert_eq!(scaled_width(400, 200, 50), 100);
        assert_eq!(scaled_width(200, 400, 50), 25);
        assert_eq!(scaled_width(333, 100, 10), 33);
        assert_eq!(scaled_width(335, 100, 10), 34);
        assert_eq!(scaled_width(1, 1000, 10), 1);
    }

    #[test]
    fn test_unrotated_keeps_aspect_ratio() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "wide.jpg", &jpeg_bytes(80, 40));

        let bytes = generate_thumbnail(&path, &options(20)).unwrap();
        assert_eq!(thumbnail_dimensions(&bytes), (40, 20));
    }

    #[test]
    fn test_rotated_codes_swap_or_keep_aspect() {
        let dir = TempDir::new().unwrap();
        // (code, expected size at height 20 for an 80x40 source)
        let cases = [
            (1, (40, 20)),
            (2, (40, 20)),
            (3, (40, 20)),
            (6, (10, 20)),
            (8, (10, 20)),
        ];
        for (code, expected) in cases {
            let name = format!("o{}.jpg", code);
            let path = write_file(dir.path(), &name, &jpeg_with_orientation(80, 40, code));
            let bytes = generate_thumbnail(&path, &options(20)).unwrap();
            assert_eq!(thumbnail_dimensions(&bytes), expected, "orientation {}", code);
        }
    }

    #[test]
    fn test_rotation_direction() {
        let dir = TempDir::new().unwrap();
        let source = split_jpeg(80, 40);

        let six = write_file(dir.path(), "six.jpg", &insert_orientation(&source, 6));
        let img = image::load_from_memory(&generate_thumbnail(&six, &options(80)).unwrap())
            .unwrap()
            .to_rgb8();
        assert_eq!(img.dimensions(), (40, 80));
        let top = img.get_pixel(20, 10);
        assert!(top[0] > top[2], "orientation 6 should put the left edge on top");

        let eight = write_file(dir.path(), "eight.jpg", &insert_orientation(&source, 8));
        let img = image::load_from_memory(&generate_thumbnail(&eight, &options(80)).unwrap())
            .unwrap()
            .to_rgb8();
        assert_eq!(img.dimensions(), (40, 80));
        let bottom = img.get_pixel(20, 70);
        assert!(bottom[0] > bottom[2], "orientation 8 should put the left edge at the bottom");
    }

    #[test]
    fn test_output_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "same.jpg", &jpeg_with_orientation(64, 48, 6));

        let first = generate_thumbnail(&path, &options(30)).unwrap();
        let second = generate_thumbnail(&path, &options(30)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_errors() {
        let dir = TempDir::new().unwrap();

        let missing = dir.path().join("missing.jpg");
        assert!(matches!(
            generate_thumbnail(&missing, &options(20)),
            Err(ImagingError::Io(_))
        ));

        let broken = write_file(dir.path(), "broken.jpg", b"definitely not a jpeg");
        assert!(matches!(
            generate_thumbnail(&broken, &options(20)),
            Err(ImagingError::Decode(_))
        ));
    }
}
