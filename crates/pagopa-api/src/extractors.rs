//! # Custom Extractors
//!
//! Helpers to extract JSON bodies and query strings in handlers with the
//! API's error mapping.
//! Request records validate themselves during deserialization, so a body
//! that parses but breaks a field rule is a 422 rather than a 400.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;

use crate::error::AppError;

/// Extract a JSON body.
///
/// - syntactically valid JSON that fails the record's rules → [`AppError::Validation`]
/// - anything else (bad syntax, wrong content type, unreadable body) → [`AppError::BadRequest`]
///
/// Handlers should use:
/// ```ignore
/// async fn handler(body: Result<Json<T>, JsonRejection>) -> Result<..., AppError> {
///     let req = extract_json(body)?;
///     // use req...
/// }
/// ```
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(v)| v).map_err(|err| {
        let message = err.body_text();
        if matches!(err, JsonRejection::JsonDataError(_)) {
            AppError::Validation(message)
        } else {
            AppError::BadRequest(message)
        }
    })
}

/// Extract a query string. Any rejection is a [`AppError::BadRequest`].
pub fn extract_query<T>(result: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    result
        .map(|Query(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}
