//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::orchestrator::RequestError;

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidArgument(String),
    #[error("Precondition failed: {0}")]
    FailedPrecondition(String),
    #[error("Geocoding failed: {0}")]
    Geocoding(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::InvalidArgument(detail) => {
                (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", detail.clone())
            }
            ApiError::FailedPrecondition(detail) => (
                StatusCode::PRECONDITION_FAILED,
                "FAILED_PRECONDITION",
                detail.clone(),
            ),
            ApiError::Geocoding(detail) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "GEOCODING_FAILED",
                detail.clone(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        match &err {
            RequestError::MissingFields(_) | RequestError::UnknownBloodGroup(_) => {
                ApiError::InvalidArgument(err.to_string())
            }
            RequestError::NoRequesterId => ApiError::FailedPrecondition(err.to_string()),
            RequestError::Geocoding(_) => ApiError::Geocoding(err.to_string()),
            RequestError::Internal(detail) => ApiError::Internal(detail.clone()),
        }
    }
}
