//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to extract
//! and validate JSON bodies in handlers.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::{AppError, FieldViolation};

/// Trait for request types that check their fields beyond what serde
/// deserialization enforces.
///
/// A successful validation yields the domain value the request describes, so
/// handlers never re-inspect optional fields.
pub trait Validate {
    /// Domain value built from a valid request.
    type Output;

    /// Check every field, returning all violations at once on failure.
    fn validate(&self) -> Result<Self::Output, Vec<FieldViolation>>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Output, AppError> {
    let value = extract_json(result)?;
    value.validate().map_err(AppError::Validation)
}

/// Return the trimmed value of a required text field, recording a violation
/// when it is absent or blank.
pub(crate) fn required_text<'a>(
    field: &str,
    value: Option<&'a str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            violations.push(FieldViolation::required(field));
            None
        }
    }
}
