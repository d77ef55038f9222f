// ABOUTME: Application error types with structured codes and HTTP status mapping
// ABOUTME: Converts internal failures into consistent JSON error responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Application-level error handling for the HTTP surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Structured error codes for API consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Request parameters failed validation.
    InvalidInput,
    /// Requested resource does not exist.
    ResourceNotFound,
}

impl ErrorCode {
    /// HTTP status code for this error class.
    #[must_use]
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::ResourceNotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Application error with a structured code and human-readable message
#[derive(Debug, Error)]
#[error("{code:?}: {message}")]
pub struct AppError {
    /// Error classification.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
}

impl AppError {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Request validation failure.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Missing resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("Resource not found: {}", resource.into()),
        )
    }

}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: ErrorCode,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.code.http_status();
        let body = Json(ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: &self.message,
            },
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_http_status() {
        assert_eq!(ErrorCode::InvalidInput.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::ResourceNotFound.http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn constructors_set_codes() {
        assert_eq!(
            AppError::invalid_input("missing q").code,
            ErrorCode::InvalidInput
        );
        assert_eq!(
            AppError::not_found("provider 'x'").code,
            ErrorCode::ResourceNotFound
        );
    }
}
