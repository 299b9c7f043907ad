use super::ImagingError;
use exif::{In, Value};
use serde_json::{json, Map};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Decoded EXIF tags keyed by tag name, ready to embed in a listing.
pub type ExifTags = Map<String, serde_json::Value>;

/// Undefined-type blobs longer than this (maker notes, embedded previews)
/// are left out of the tag set.
const MAX_BLOB_LEN: usize = 64;

/// Decodes every tag of the primary image, including its Exif and GPS
/// sub-directories. Thumbnail directory tags are skipped.
pub fn read_exif_tags(path: &Path) -> Result<ExifTags, ImagingError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let exif = exif::Reader::new().read_from_container(&mut reader)?;

    let mut tags = ExifTags::new();
    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        if let Some(value) = value_to_json(&field.value) {
            tags.entry(field.tag.to_string()).or_insert(value);
        }
    }
    Ok(tags)
}

fn value_to_json(value: &Value) -> Option<serde_json::Value> {
    let json = match value {
        Value::Ascii(strings) => one_or_many(
            strings
                .iter()
                .map(|s| json!(String::from_utf8_lossy(s).trim_end_matches('\0')))
                .collect(),
        ),
        Value::Byte(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::Short(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::Long(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::SByte(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::SShort(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::SLong(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::Float(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::Double(v) => one_or_many(v.iter().map(|n| json!(n)).collect()),
        Value::Rational(v) => one_or_many(
            v.iter()
                .map(|r| json!(format!("{}/{}", r.num, r.denom)))
                .collect(),
        ),
        Value::SRational(v) => one_or_many(
            v.iter()
                .map(|r| json!(format!("{}/{}", r.num, r.denom)))
                .collect(),
        ),
        Value::Undefined(bytes, _) => {
            if bytes.len() > MAX_BLOB_LEN {
                return None;
            }
            if bytes.iter().all(|b| b.is_ascii_graphic() || *b == b' ') {
                json!(String::from_utf8_lossy(bytes))
            } else {
                json!(bytes)
            }
        }
        // unknown field types carry no decodable payload
        _ => return None,
    };
    Some(json)
}

fn one_or_many(mut values: Vec<serde_json::Value>) -> serde_json::Value {
    if values.len() == 1 {
        values.pop().unwrap_or_default()
    } else {
        serde_json::Value::Array(values)
    }
}
