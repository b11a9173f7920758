//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps codec errors from taxcode-core to HTTP status codes and returns JSON
//! error bodies with error code, message, and details. Internal error details
//! are never returned to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use taxcode_core::CodecError;
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Field violations, present only for rejected requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// A single field-level request violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// JSON property name as sent by the client.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldViolation {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("missing required property {field}"),
        }
    }

    pub fn invalid(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("invalid value for property {field}"),
        }
    }

    pub fn not_in_past(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: format!("invalid date for property {field}: it must be in the past"),
        }
    }
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Birth place or place code unknown to the registry (404).
    #[error("{0}")]
    NotFound(String),

    /// One or more request fields failed validation (400).
    #[error("{}", join_messages(.0))]
    Validation(Vec<FieldViolation>),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Tax code is well-formed but names no valid person (422).
    #[error("{0}")]
    Unprocessable(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) | Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_ENTITY"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            other => tracing::warn!(status = status.as_u16(), error = %other, "request rejected"),
        }

        let details = match &self {
            Self::Validation(violations) => serde_json::to_value(violations).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert codec errors to API errors.
///
/// A [`CodecError::Validation`] can only surface after the request passed
/// validation, so it points at bad place data and is reported as internal.
impl From<CodecError> for AppError {
    fn from(err: CodecError) -> Self {
        match &err {
            CodecError::PlaceNotFound(_) => Self::NotFound(err.to_string()),
            CodecError::Decode(_) => Self::Unprocessable(err.to_string()),
            CodecError::Validation(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taxcode_core::{DecodeError, PlaceNotFound, ValidationError};

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (AppError::Validation(vec![]), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (
                AppError::Unprocessable("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
            ),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err:?}");
        }
    }

    #[test]
    fn validation_message_joins_violations() {
        let err = AppError::Validation(vec![
            FieldViolation::required("name"),
            FieldViolation::invalid("gender"),
        ]);
        assert_eq!(
            err.to_string(),
            "missing required property name, invalid value for property gender"
        );
    }

    #[test]
    fn violation_messages() {
        assert_eq!(
            FieldViolation::not_in_past("dateOfBirth").message,
            "invalid date for property dateOfBirth: it must be in the past"
        );
    }

    #[test]
    fn place_not_found_maps_to_404() {
        let err = AppError::from(CodecError::from(PlaceNotFound::ByPlace {
            name: "fakeCity".into(),
            province: "fakeProvince".into(),
        }));
        match err {
            AppError::NotFound(msg) => {
                assert_eq!(msg, "The city fakeCity and province fakeProvince do not exist");
            }
            other => panic!("expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn decode_error_maps_to_422() {
        let err = AppError::from(CodecError::from(DecodeError::InvalidDate {
            year: 1993,
            month: 2,
            day: 30,
        }));
        assert_eq!(err.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn codec_validation_error_is_internal() {
        let err = AppError::from(CodecError::from(ValidationError::InvalidPlaceCode(
            "??".into(),
        )));
        assert!(matches!(err, AppError::Internal(_)));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_validation_carries_details() {
        let (status, body) = response_parts(AppError::Validation(vec![
            FieldViolation::required("surname"),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error.message, "missing required property surname");
        let details = body.error.details.unwrap();
        assert_eq!(details[0]["field"], "surname");
    }

    #[tokio::test]
    async fn into_response_not_found_has_no_details() {
        let (status, body) = response_parts(AppError::NotFound("gone".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error.message, "gone");
        assert!(body.error.details.is_none());
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("place file corrupt".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }
}
