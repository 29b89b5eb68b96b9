//! Error types for portal-search
//!
//! Every request-level failure is reported with the same envelope:
//! HTTP 500 and `{"error": "Search request failed", "details": "..."}`.
//! Per-source failures never reach this type; the aggregator absorbs them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::any::Any;
use thiserror::Error;
use tracing::error;

use crate::search::SearchError;

/// Generic message shown to clients
pub const SEARCH_FAILED: &str = "Search request failed";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Fan-out could not be completed
    #[error(transparent)]
    Search(#[from] SearchError),

    /// Internal server error (e.g. a panic in a handler)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let details = self.to_string();
        error!(details = %details, "Search request failed");

        let body = Json(json!({
            "error": SEARCH_FAILED,
            "details": details,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Panic handler for `CatchPanicLayer`, keeping the 500 envelope
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    };

    ApiError::Internal(details).into_response()
}
