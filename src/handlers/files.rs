//! Raw file streaming, shared by the photo pass-through and the static
//! front-end.

use crate::error::AppError;
use crate::utils::common::{http_date, mime_guess};
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use std::io::SeekFrom;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

/// Inclusive byte range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum RangeRequest {
    Full,
    Partial(ByteRange),
    Unsatisfiable,
}

/// Interprets a `Range` header against a file of `size` bytes. Only a single
/// `bytes=` range is honored; anything else is served in full.
pub fn parse_range(value: Option<&str>, size: u64) -> RangeRequest {
    let Some(ranges) = value.and_then(|v| v.trim().strip_prefix("bytes=")) else {
        return RangeRequest::Full;
    };
    if ranges.contains(',') {
        return RangeRequest::Full;
    }
    let Some((start, end)) = ranges.trim().split_once('-') else {
        return RangeRequest::Full;
    };

    let range = match (start.trim(), end.trim()) {
        ("", "") => return RangeRequest::Full,
        // suffix: the last N bytes
        ("", suffix) => match suffix.parse::<u64>() {
            Ok(n) if n == 0 || size == 0 => return RangeRequest::Unsatisfiable,
            Ok(n) => ByteRange {
                start: size.saturating_sub(n),
                end: size - 1,
            },
            Err(_) => return RangeRequest::Full,
        },
        (start, end) => {
            let Ok(start) = start.parse::<u64>() else {
                return RangeRequest::Full;
            };
            if start >= size {
                return RangeRequest::Unsatisfiable;
            }
            let end = if end.is_empty() {
                size - 1
            } else {
                match end.parse::<u64>() {
                    Ok(end) if end >= start => end.min(size - 1),
                    _ => return RangeRequest::Full,
                }
            };
            ByteRange { start, end }
        }
    };

    RangeRequest::Partial(range)
}

/// Streams the file at `path`. Directories are refused; a missing file maps
/// to 404 through the `io::Error` conversion.
pub async fn serve_file(path: &Path, headers: &HeaderMap) -> Result<Response, AppError> {
    let metadata = fs::metadata(path).await?;
    if metadata.is_dir() {
        return Err(AppError::BadRequest(
            "Path is a directory, not a file".to_string(),
        ));
    }

    let size = metadata.len();
    let mime_type = mime_guess(path);
    let last_modified = metadata
        .modified()
        .ok()
        .map(|t| http_date(DateTime::<Utc>::from(t)));

    let range = parse_range(
        headers.get(header::RANGE).and_then(|v| v.to_str().ok()),
        size,
    );

    let mut file = fs::File::open(path).await?;
    let mut response = match range {
        RangeRequest::Unsatisfiable => {
            let mut response = StatusCode::RANGE_NOT_SATISFIABLE.into_response();
            insert_header(&mut response, header::CONTENT_RANGE, format!("bytes */{}", size));
            return Ok(response);
        }
        RangeRequest::Full => {
            let body = Body::from_stream(ReaderStream::new(file));
            let mut response = (StatusCode::OK, body).into_response();
            insert_header(&mut response, header::CONTENT_LENGTH, size.to_string());
            response
        }
        RangeRequest::Partial(range) => {
            file.seek(SeekFrom::Start(range.start)).await?;
            let body = Body::from_stream(ReaderStream::new(file.take(range.len())));
            let mut response = (StatusCode::PARTIAL_CONTENT, body).into_response();
            insert_header(&mut response, header::CONTENT_LENGTH, range.len().to_string());
            insert_header(
                &mut response,
                header::CONTENT_RANGE,
                format!("bytes {}-{}/{}", range.start, range.end, size),
            );
            response
        }
    };

    insert_header(&mut response, header::CONTENT_TYPE, mime_type.to_string());
    insert_header(&mut response, header::ACCEPT_RANGES, "bytes".to_string());
    if let Some(last_modified) = last_modified {
        insert_header(&mut response, header::LAST_MODIFIED, last_modified);
    }

    Ok(response)
}

fn insert_header(response: &mut Response, name: header::HeaderName, value: String) {
    if let Ok(value) = HeaderValue::from_str(&value) {
        response.headers_mut().insert(name, value);
    }
}
