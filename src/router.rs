use crate::handlers::{frontend, health, photos, thumbnail};
use crate::middleware::logging;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};
use std::sync::Arc;

pub fn create_router(state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/", get(frontend::index))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/thumbnail/{*path}", get(thumbnail::thumbnail))
        .route("/photos/", get(photos::photos_root))
        .route("/photos/{*path}", get(photos::photos))
        .fallback(frontend::static_file)
        .layer(middleware::from_fn(logging::logging_middleware))
        .with_state(state)
}
