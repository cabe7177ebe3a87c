//! Dashboard error types and handling

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use finsec_domain::DomainError;
use thiserror::Error;

use crate::views::layout::error_page;

/// Dashboard error types
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Requested resource does not exist yet
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure inside a handler
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Domain rule violation or export failure
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Outbound HTTP client could not be built or used
    #[error("HTTP client error: {0}")]
    Http(#[from] finsec_http::HttpError),

    /// Invalid dashboard configuration
    #[error("Configuration error: {0}")]
    Config(#[from] finsec_config::ConfigError),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = match &self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Domain(DomainError::ValidationError { .. })
            | DashboardError::Domain(DomainError::InvalidUpload { .. })
            | DashboardError::Domain(DomainError::UnknownView { .. }) => StatusCode::BAD_REQUEST,
            DashboardError::Domain(DomainError::ExportFailed { .. })
            | DashboardError::Internal(_)
            | DashboardError::Http(_)
            | DashboardError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        }

        (status, Html(error_page(status, &self.to_string()))).into_response()
    }
}

/// Result type alias for dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
