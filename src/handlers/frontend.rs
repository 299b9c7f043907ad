use crate::error::AppError;
use crate::handlers::files::serve_file;
use crate::state::AppState;
use crate::utils::path::{is_listing_path, resolve_path};
use axum::{
    extract::State,
    http::{HeaderMap, Uri},
    response::Response,
};
use std::sync::Arc;

const INDEX: &str = "index.html";

pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    serve_file(&state.config.static_dir.join(INDEX), &headers).await
}

/// Serves anything no other route claimed out of the static directory.
pub async fn static_file(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let decoded = urlencoding::decode(uri.path())
        .map_err(|e| AppError::BadRequest(format!("invalid path encoding: {}", e)))?;
    let request_path = decoded.trim_start_matches('/');
    let mut path = resolve_path(&state.config.static_dir, request_path)?;
    if is_listing_path(request_path) {
        path.push(INDEX);
    }
    serve_file(&path, &headers).await
}
