//! `/photos/...`: directory listings as JSON, anything else streamed raw.

pub mod list;
pub mod types;

use crate::error::AppError;
use crate::handlers::files::serve_file;
use crate::state::AppState;
use crate::utils::common::encode_url_path;
use crate::utils::path::{is_listing_path, resolve_path};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use list::list_directory;

/// `GET /photos/` lists the storage root.
pub async fn photos_root(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let files = list_directory(&state, "").await?;
    Ok(Json(files).into_response())
}

/// A directory requested without its trailing slash is redirected to the
/// listing URL.
pub async fn photos(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if is_listing_path(&path) {
        let files = list_directory(&state, &path).await?;
        return Ok(Json(files).into_response());
    }

    let file_path = resolve_path(&state.config.storage_path, &path)?;
    if tokio::fs::metadata(&file_path).await?.is_dir() {
        let location = format!("/photos/{}/", encode_url_path(&path));
        let redirect = (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]);
        return Ok(redirect.into_response());
    }
    serve_file(&file_path, &headers).await
}
