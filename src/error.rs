use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to a single request
///
/// Startup failures never reach this type; they abort the process through
/// `anyhow` in `main`.
#[derive(Debug)]
pub enum ApiError {
    /// Direct input could not be decoded as a JSON object
    InvalidJson(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidJson(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Invalid JSON: {}", err),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidJson(err)
    }
}
