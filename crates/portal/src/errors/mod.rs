use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Result type for portal operations
pub type PortalResult<T> = Result<T, PortalError>;

/// Portal errors
///
/// The not-found messages are the exact strings clients see in the
/// `{"error": ...}` body.
#[derive(thiserror::Error, Debug)]
pub enum PortalError {
    #[error("Server not found")]
    ServerNotFound { id: String },
    #[error("README not found")]
    ReadmeNotFound { id: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid directory path: {path}")]
    InvalidDirectory { path: String },
    /// Logging initialization failed
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },
}

impl PortalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::ServerNotFound { .. } | PortalError::ReadmeNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {:?}", self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
