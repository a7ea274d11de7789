//! API error handling.
//!
//! Every failure leaves the HTTP edge as a JSON body of the form
//! `{"code", "message", "details"?}`.

use crate::record::{
    domain::RecordId,
    services::{RecordServiceError, RequestValidationError},
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error code for rejected request input.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
/// Error code for missing resources.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Error code for server-side faults.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// API error structure for JSON responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional field-level errors for validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates a new API error.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error with field-level details.
    #[must_use]
    pub fn validation(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self {
            code: VALIDATION_ERROR.to_owned(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Field-level error for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: String,
    /// Error message for this field.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API error response containing status code and error details.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error details.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a new API error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 Bad Request response for invalid query or path
    /// parameters.
    #[must_use]
    pub fn bad_request(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::validation(message, details))
    }

    /// Creates a 422 Unprocessable Entity response for invalid request
    /// bodies.
    #[must_use]
    pub fn unprocessable(message: impl Into<String>, details: Vec<FieldError>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::validation(message, details),
        )
    }

    /// Creates a 404 Not Found response.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new(NOT_FOUND, message))
    }

    /// Creates a 500 Internal Server Error response.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new(INTERNAL_ERROR, message),
        )
    }

    /// Maps a record lookup miss to a 404 response.
    #[must_use]
    pub fn record_not_found(id: RecordId) -> Self {
        Self::not_found(format!("Record {id} not found"))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

fn field_errors(error: &RequestValidationError) -> Vec<FieldError> {
    error
        .violations()
        .iter()
        .map(|violation| FieldError::new(violation.field, violation.message.clone()))
        .collect()
}

impl From<RecordServiceError> for ApiErrorResponse {
    fn from(error: RecordServiceError) -> Self {
        match error {
            RecordServiceError::InvalidQuery(invalid) => {
                Self::bad_request("Invalid query parameters", field_errors(&invalid))
            }
            RecordServiceError::InvalidPayload(invalid) => {
                Self::unprocessable("Invalid request body", field_errors(&invalid))
            }
            RecordServiceError::NotFound(id) => Self::record_not_found(id),
            RecordServiceError::Repository(cause) => {
                tracing::error!(error = %cause, "record storage failure");
                Self::internal_error("An internal error occurred")
            }
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        Self::new(
            status,
            ApiError::validation(
                "Invalid request body",
                vec![FieldError::new("body", rejection.body_text())],
            ),
        )
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(
            "Invalid query parameters",
            vec![FieldError::new("query", rejection.body_text())],
        )
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(
            "Invalid path parameter",
            vec![FieldError::new("id", rejection.body_text())],
        )
    }
}
