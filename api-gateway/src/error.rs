//! Error handling for the API gateway

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error information
    pub error: ErrorInfo,
    /// Request ID for tracing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Detailed error information
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Error code (string identifier for the error type)
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Service error: {0}")]
    Common(#[from] common::error::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Generate a request ID for tracking errors
        let request_id = Uuid::new_v4().to_string();

        // Log the error with request ID for backend tracing
        tracing::error!("API Error [{}]: {:?}", request_id, &self);

        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Common(e) => match e {
                // Client errors (4xx)
                common::error::Error::AccountNotFound(_) => {
                    (StatusCode::NOT_FOUND, "account_not_found")
                }
                common::error::Error::InvalidAmount(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "invalid_amount")
                }
                common::error::Error::NegativeBalance(_) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "negative_balance")
                }
                common::error::Error::InsufficientFunds(_) => {
                    (StatusCode::FORBIDDEN, "insufficient_funds")
                }
                common::error::Error::ValidationError(_) => {
                    (StatusCode::BAD_REQUEST, "validation_error")
                }

                // Server errors (5xx)
                common::error::Error::ConfigurationError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "configuration_error")
                }
                common::error::Error::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
                }
                common::error::Error::Database(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
                common::error::Error::Migration(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "migration_error")
                }
            },
        };

        let error_response = ErrorResponse {
            error: ErrorInfo {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id: Some(request_id),
        };

        (status, Json(error_response)).into_response()
    }
}
