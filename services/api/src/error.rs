//! Custom error types for the users API

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Custom error type for the users API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested user or address does not exist
    #[error("Not found")]
    NotFound,

    /// Request body could not be read as the expected JSON
    #[error("Unprocessable request body: {0}")]
    UnprocessableEntity(#[from] JsonRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::UnprocessableEntity(rejection) => {
                let message = rejection.body_text();
                warn!("Rejected request body: {}", message);

                let body = Json(json!({
                    "error": message,
                }));

                (rejection.status(), body).into_response()
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
