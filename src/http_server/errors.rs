//! # API Errors
//!
//! Error types for the student endpoints and their JSON bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::ValidationError;

/// Student API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Student document failed validation
    #[error("Validation failed")]
    Validation(ValidationError),

    /// Body was not parseable JSON
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Insert failed for a reason other than validation
    #[error("Failed to save student")]
    SaveFailed,

    /// Listing failed
    #[error("Fetch failed")]
    FetchFailed,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::SaveFailed | ApiError::FetchFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 400 body: `{ error, details }`
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub details: Vec<String>,
}

/// 500 body for a failed create: `{ error, message }`
#[derive(Debug, Serialize)]
pub struct InternalErrorResponse {
    pub error: String,
    pub message: String,
}

/// 500 body for a failed list: `{ error }`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(err) => (
                status,
                Json(ValidationErrorResponse {
                    error: "Validation failed".to_string(),
                    details: err.messages(),
                }),
            )
                .into_response(),
            ApiError::InvalidBody(reason) => (
                status,
                Json(ValidationErrorResponse {
                    error: "Validation failed".to_string(),
                    details: vec![reason],
                }),
            )
                .into_response(),
            ApiError::SaveFailed => (
                status,
                Json(InternalErrorResponse {
                    error: "Internal Server Error".to_string(),
                    message: ApiError::SaveFailed.to_string(),
                }),
            )
                .into_response(),
            ApiError::FetchFailed => (
                status,
                Json(ErrorResponse {
                    error: ApiError::FetchFailed.to_string(),
                }),
            )
                .into_response(),
        }
    }
}
