use crate::AppState;
use crate::config::{CollisionPolicy, SortVariant};
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub upload_dir: String,
    pub output_dir: String,
    pub variant: SortVariant,
    pub collision_policy: CollisionPolicy,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "System health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let lifecycle = state.sorter.lifecycle();
    let upload_ready = lifecycle.upload_dir().is_dir();
    let output_ready = lifecycle.output_dir().is_dir();
    let status = if upload_ready && output_ready {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        upload_dir: dir_status(upload_ready),
        output_dir: dir_status(output_ready),
        variant: state.config.variant,
        collision_policy: state.config.collision_policy,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn dir_status(ready: bool) -> String {
    if ready { "ready" } else { "missing" }.to_string()
}
