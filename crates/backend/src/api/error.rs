use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::product::error::ProductError;

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ProductError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ProductError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ProductError::Store(e) => {
                tracing::error!("Store failure: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Unmatched /api/* paths answer JSON, not the front-end shell.
pub async fn api_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "API endpoint not found" })),
    )
        .into_response()
}
