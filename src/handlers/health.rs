use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    status: String,
    uptime: String,
    version: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessCheckResponse {
    readiness_status: String,
    storage: bool,
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    let uptime = state.start_time.elapsed().as_secs();
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        uptime: format!("{}s", uptime),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn readiness_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<ReadinessCheckResponse>) {
    // Storage root must be a readable directory
    let storage_ready = tokio::fs::metadata(&state.config.storage_path)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);

    let (status, readiness_status) = if storage_ready {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "not_ready")
    };

    (
        status,
        Json(ReadinessCheckResponse {
            readiness_status: readiness_status.to_string(),
            storage: storage_ready,
        }),
    )
}
