//! Registry error types with HTTP status code mapping.
//!
//! [`RegistryError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and a flat JSON error response.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::StudentId;

/// Message returned to clients for any unexpected server-side failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error occurred";

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// { "error": "Missing required field: email", "code": 1001 }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    #[schema(example = "Email already registered!")]
    pub error: String,
    /// Numeric error code (see code ranges on [`RegistryError`]).
    #[schema(example = 2001)]
    pub code: u32,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category   | HTTP Status                |
/// |-----------|------------|----------------------------|
/// | 1000–1999 | Validation | 400 Bad Request            |
/// | 2000–2999 | Conflict   | 400 Bad Request            |
/// | 3000–3999 | Not Found  | 404 Not Found              |
/// | 5000–5999 | Server     | 500 Internal / 408 Timeout |
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A required registration field was absent or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A registration field was present but had an unusable value.
    #[error("Invalid {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The request could not be decoded (bad JSON, bad path segment).
    #[error("Malformed request: {0}")]
    MalformedBody(String),

    /// Another student already registered with this email.
    #[error("Email already registered!")]
    DuplicateEmail(String),

    /// No student has the given id.
    #[error("Student not found")]
    StudentNotFound(StudentId),

    /// The requested id is an integer no student can ever be assigned
    /// (ids start at 1).
    #[error("Student not found")]
    StudentIdOutOfRange(i64),

    /// The request did not finish within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Internal server error. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RegistryError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MissingField(_) => 1001,
            Self::InvalidField { .. } => 1002,
            Self::MalformedBody(_) => 1003,
            Self::DuplicateEmail(_) => 2001,
            Self::StudentNotFound(_) => 3001,
            Self::StudentIdOutOfRange(_) => 3002,
            Self::Internal(_) => 5000,
            Self::Timeout => 5001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::InvalidField { .. }
            | Self::MalformedBody(_)
            | Self::DuplicateEmail(_) => StatusCode::BAD_REQUEST,
            Self::StudentNotFound(_) | Self::StudentIdOutOfRange(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Returns the message exposed to clients.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => SERVER_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<JsonRejection> for RegistryError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl From<PathRejection> for RegistryError {
    fn from(rejection: PathRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        if let Self::Internal(detail) = &self {
            tracing::error!(%detail, "request failed with internal error");
        }
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.client_message(),
            code: self.error_code(),
        };
        (status, axum::Json(body)).into_response()
    }
}
