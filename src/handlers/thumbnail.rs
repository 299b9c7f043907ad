use crate::error::AppError;
use crate::imaging::{generate_thumbnail, ThumbnailOptions};
use crate::state::AppState;
use crate::utils::path::resolve_path;
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ThumbnailParams {
    height: Option<String>,
}

/// `GET /thumbnail/{path}?height=N`: decoded, rotated and resized on every
/// request.
pub async fn thumbnail(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
    Query(params): Query<ThumbnailParams>,
) -> Result<Response, AppError> {
    let source = resolve_path(&state.config.storage_path, &path)?;
    if tokio::fs::metadata(&source).await?.is_dir() {
        return Err(AppError::BadRequest(format!(
            "not an image: {} is a directory",
            path
        )));
    }
    let options = ThumbnailOptions::from_query(
        params.height.as_deref(),
        state.config.max_thumbnail_height,
        state.config.orientation_mode,
    );

    let jpeg =
        tokio::task::spawn_blocking(move || generate_thumbnail(&source, &options)).await??;

    Ok(([(header::CONTENT_TYPE, "image/jpeg")], jpeg).into_response())
}
