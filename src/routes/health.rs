use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::SharedState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub log_dir: String,
    pub log_dir_readable: bool,
}

/// "ok" when the log directory can be listed, "degraded" otherwise.
pub fn determine_overall_status(log_dir_readable: bool) -> &'static str {
    if log_dir_readable {
        "ok"
    } else {
        "degraded"
    }
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let log_dir = state.service.log_dir();
    let log_dir_readable = tokio::fs::read_dir(log_dir).await.is_ok();

    Json(HealthResponse {
        status: determine_overall_status(log_dir_readable).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        log_dir: log_dir.display().to_string(),
        log_dir_readable,
    })
}
