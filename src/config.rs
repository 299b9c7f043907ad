use crate::imaging::OrientationMode;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server listening address
    pub addr: String,

    /// Directory under which every served photo path is resolved
    pub storage_path: PathBuf,

    /// Thumbnail cache directory (reserved; thumbnails are not cached)
    pub cache_dir: PathBuf,

    /// Directory holding the web front-end
    pub static_dir: PathBuf,

    /// Which EXIF orientation table thumbnails are corrected with
    pub orientation_mode: OrientationMode,

    /// Upper bound for requested thumbnail heights, unlimited when `None`
    pub max_thumbnail_height: Option<u32>,
}

const DEFAULT_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_STORAGE_PATH: &str = "/media/sf_Photos";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_MAX_THUMBNAIL_HEIGHT: u32 = 4096;

impl Config {
    pub fn load() -> Self {
        Self::from_sources(std::env::args(), |key| std::env::var(key).ok())
    }

    /// Builds the config from environment lookups, then lets `--key=value`
    /// arguments override them.
    pub fn from_sources<A, E>(args: A, env: E) -> Self
    where
        A: IntoIterator<Item = String>,
        E: Fn(&str) -> Option<String>,
    {
        let mut addr = env("ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let mut storage_path =
            PathBuf::from(env("STORAGE_PATH").unwrap_or_else(|| DEFAULT_STORAGE_PATH.to_string()));
        let mut cache_dir = env("CACHE_DIR").map(PathBuf::from);
        let mut static_dir =
            PathBuf::from(env("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()));
        let mut orientation_mode = env("ORIENTATION_MODE")
            .and_then(|s| parse_orientation_mode(&s))
            .unwrap_or_default();
        let mut max_thumbnail_height = env("MAX_THUMBNAIL_HEIGHT")
            .and_then(|s| parse_height_limit(&s))
            .unwrap_or(Some(DEFAULT_MAX_THUMBNAIL_HEIGHT));

        for arg in args {
            if let Some(value) = arg.strip_prefix("--addr=") {
                addr = value.to_string();
            } else if let Some(value) = arg.strip_prefix("--storage-path=") {
                storage_path = PathBuf::from(value);
            } else if let Some(value) = arg.strip_prefix("--cache-dir=") {
                cache_dir = Some(PathBuf::from(value));
            } else if let Some(value) = arg.strip_prefix("--static-dir=") {
                static_dir = PathBuf::from(value);
            } else if let Some(value) = arg.strip_prefix("--orientation-mode=") {
                if let Some(mode) = parse_orientation_mode(value) {
                    orientation_mode = mode;
                }
            } else if let Some(value) = arg.strip_prefix("--max-thumbnail-height=") {
                if let Some(limit) = parse_height_limit(value) {
                    max_thumbnail_height = limit;
                }
            }
        }

        let cache_dir = cache_dir.unwrap_or_else(|| storage_path.join("tmp"));

        Config {
            addr,
            storage_path,
            cache_dir,
            static_dir,
            orientation_mode,
            max_thumbnail_height,
        }
    }
}

fn parse_orientation_mode(value: &str) -> Option<OrientationMode> {
    match value.parse() {
        Ok(mode) => Some(mode),
        Err(err) => {
            tracing::warn!("ignoring orientation mode: {}", err);
            None
        }
    }
}

/// `0` lifts the ceiling; anything that is not a `u32` is ignored.
fn parse_height_limit(value: &str) -> Option<Option<u32>> {
    match value.trim().parse::<u32>() {
        Ok(0) => Some(None),
        Ok(height) => Some(Some(height)),
        Err(_) => {
            tracing::warn!("ignoring thumbnail height ceiling `{}`", value);
            None
        }
    }
}
