use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

pub fn build_router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health
        .route("/health", get(crate::routes::health::health))
        // Log listing, details and download
        .route("/logs", get(crate::routes::logs::list_logs))
        .route(
            "/logs/details/{filename}",
            get(crate::routes::logs::log_details),
        )
        .route("/logs/{filename}", get(crate::routes::logs::download_log))
        // Rollup
        .route("/network-stats", get(crate::routes::logs::network_stats))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
