//! # API Errors
//!
//! Error types returned by the HTTP handlers.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::storage::StorageError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler errors
///
/// Failed logins are not errors here; they are a normal 401 response.
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Body is not a JSON object, or lacks a required key
    #[error("Missing required fields")]
    MissingFields,

    /// A required key holds the wrong JSON type
    #[error("Invalid field type: {0}")]
    InvalidFieldType(&'static str),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password must be at least 6 characters")]
    InvalidPassword,

    /// `/search` called without a usable `name`
    #[error("Please provide a name to search")]
    MissingSearchName,

    /// Body could not be read as JSON
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("User not found")]
    UserNotFound,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure, surfaced with its raw message
    #[error("{0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFields
            | ApiError::InvalidFieldType(_)
            | ApiError::InvalidEmail
            | ApiError::InvalidPassword
            | ApiError::MissingSearchName
            | ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,

            ApiError::UserNotFound => StatusCode::NOT_FOUND,

            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidJson(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidPassword.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingSearchName.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage(StorageError::Task("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::UserNotFound.to_string(), "User not found");
        assert_eq!(ApiError::MissingFields.to_string(), "Missing required fields");
        assert_eq!(
            ApiError::InvalidPassword.to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_storage_error_message_is_passed_through() {
        let err = ApiError::from(StorageError::Task("disk gone".to_string()));
        let body = ErrorResponse::from(&err);
        assert_eq!(body.error, "storage task failed: disk gone");
    }
}
