use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info};

use crate::discovery::LogFileDescriptor;
use crate::error::StatsError;
use crate::listing::{ListQuery, Page, PageRequest};
use crate::rollup::NetworkRollup;
use crate::stats::FileStatistics;
use crate::state::SharedState;

/// GET /logs — one page of log files, most recent first.
pub async fn list_logs(
    State(state): State<SharedState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<LogFileDescriptor>>, StatsError> {
    let request = PageRequest::from_query(&query, state.config.default_limit);
    let page = state
        .service
        .list_files(&request)
        .await
        .inspect_err(|e| error!("Listing failed: {}", e))?;

    info!(
        "Listed page {} of {} ({} of {} files, network {:?})",
        page.page_number,
        page.total_pages,
        page.items.len(),
        page.total_items,
        request.network
    );
    Ok(Json(page))
}

/// GET /logs/details/{filename} — statistics for a single file.
pub async fn log_details(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Json<FileStatistics>, StatsError> {
    let stats = state.service.file_statistics(&filename).await?;
    Ok(Json(stats))
}

/// GET /network-stats — rollup across every log file, keyed by network.
pub async fn network_stats(
    State(state): State<SharedState>,
) -> Result<Json<NetworkRollup>, StatsError> {
    let rollup = state
        .service
        .network_statistics()
        .await
        .inspect_err(|e| error!("Network rollup failed: {}", e))?;
    Ok(Json(rollup))
}

/// GET /logs/{filename} — download the raw file.
pub async fn download_log(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, StatsError> {
    let body = state.service.raw_file(&filename).await?;

    // Quotes would terminate the header's filename parameter
    let disposition = format!(
        "attachment; filename=\"{}\"",
        filename.replace('"', "\\\"")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
