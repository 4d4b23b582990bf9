use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Unable to read log directory {path:?}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file not found: {0}")]
    FileNotFound(String),

    #[error("Unable to read log file {name}: {source}")]
    FileReadFailure {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log file name: {0:?}")]
    InvalidFileName(String),
}

impl StatsError {
    /// Stable tag so callers can branch without parsing the message.
    pub fn kind(&self) -> &'static str {
        match self {
            StatsError::DirectoryUnavailable { .. } => "directory_unavailable",
            StatsError::FileNotFound(_) => "file_not_found",
            StatsError::FileReadFailure { .. } => "file_read_failure",
            StatsError::InvalidFileName(_) => "invalid_file_name",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            StatsError::DirectoryUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            StatsError::FileNotFound(_) => StatusCode::NOT_FOUND,
            StatsError::FileReadFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StatsError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind(),
        });

        (status, axum::Json(body)).into_response()
    }
}
