//! API error types.
//!
//! Only this boundary decides status codes and the wire shape of a
//! failure; everything below it propagates `SeatwiseError`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seatwise_core::error::{FieldError, SeatwiseError};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SeatwiseError> for ApiError {
    fn from(err: SeatwiseError) -> Self {
        match err {
            SeatwiseError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            SeatwiseError::AlreadyExists { .. } => ApiError::Conflict(err.to_string()),
            SeatwiseError::Validation { message, fields } => {
                ApiError::Validation { message, fields }
            }
            SeatwiseError::Database(msg) | SeatwiseError::Internal(msg) => {
                ApiError::Internal(msg)
            }
        }
    }
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, Vec::new()),
            ApiError::Validation { message, fields } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message, fields)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg, Vec::new()),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg, Vec::new())
            }
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

/// API result type.
pub type ApiResult<T> = Result<T, ApiError>;
