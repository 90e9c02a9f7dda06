//! Mapping from the service error taxonomy to HTTP responses
//!
//! Validation failures are 400, typed not-found is 404, and database or
//! enrichment faults are 500. Response bodies carry a short non-sensitive
//! message; the full error is logged here with its context.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error};

use crate::error::SongshelfError;

impl IntoResponse for SongshelfError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            SongshelfError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            SongshelfError::SongNotFound { .. } => {
                (StatusCode::NOT_FOUND, "song not found".to_string())
            }
            SongshelfError::Enrichment(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "failed to fetch song details".to_string(),
            ),
            SongshelfError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            debug!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
