//! # Error Types Module
//!
//! Structured errors for task storage and for the webhook endpoints.
//! Validation and not-found failures are turned into chat replies by the
//! bot layer; only storage failures travel all the way to the HTTP response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

/// Errors reported by a [`TaskStore`](crate::store::TaskStore)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No task with this id belongs to the requesting owner
    #[error("task {0} not found for this owner")]
    NotFound(i64),
    /// Content was empty or whitespace-only
    #[error("task content cannot be empty")]
    EmptyContent,
    /// Connection or query failure in the underlying database
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Hard failure of a webhook request
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": "An unexpected error occurred while processing your request. Please try again later."
            })),
        )
            .into_response()
    }
}
