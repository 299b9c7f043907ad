use chrono::{DateTime, Utc};
use std::path::Path;

/// Extensions (lowercase, with the dot) that mark a file as a photo.
pub const PHOTO_EXTENSIONS: &[&str] = &[".jpg", ".jpeg"];

/// Case-insensitive photo extension check on a file name.
pub fn has_photo_extension(name: &str) -> bool {
    let lower = name.to_lowercase();
    PHOTO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Guess MIME type from file path.
pub fn mime_guess(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => match ext.to_lowercase().as_str() {
            "html" | "htm" => "text/html; charset=utf-8",
            "css" => "text/css; charset=utf-8",
            "js" | "mjs" => "application/javascript",
            "json" => "application/json",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "heic" => "image/heic",
            "tif" | "tiff" => "image/tiff",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            "txt" => "text/plain; charset=utf-8",
            "mp4" => "video/mp4",
            "mov" => "video/quicktime",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}

/// Percent-encodes every segment of a slash-separated URL path, keeping the
/// slashes themselves.
pub fn encode_url_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// IMF-fixdate as used by `Last-Modified`.
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_photo_extension() {
        assert!(has_photo_extension("photo.jpg"));
        assert!(has_photo_extension("photo.JPG"));
        assert!(has_photo_extension("IMG_0001.JpEg"));
        assert!(!has_photo_extension("notes.txt"));
        assert!(!has_photo_extension("jpg"));
        assert!(!has_photo_extension("photo.jpg.txt"));
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_guess(Path::new("a/b.JPG")), "image/jpeg");
        assert_eq!(mime_guess(Path::new("index.html")), "text/html; charset=utf-8");
        assert_eq!(mime_guess(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_encode_url_path() {
        assert_eq!(encode_url_path("/photos/2019/a.jpg"), "/photos/2019/a.jpg");
        assert_eq!(
            encode_url_path("/photos/summer trip/Ünïcode #1.jpg"),
            "/photos/summer%20trip/%C3%9Cn%C3%AFcode%20%231.jpg"
        );
        assert_eq!(encode_url_path("/thumbnail/a?b.jpg"), "/thumbnail/a%3Fb.jpg");
    }

    #[test]
    fn test_http_date() {
        let t = Utc.with_ymd_and_hms(1994, 11, 6, 8, 49, 37).unwrap();
        assert_eq!(http_date(t), "Sun, 06 Nov 1994 08:49:37 GMT");
    }
}
