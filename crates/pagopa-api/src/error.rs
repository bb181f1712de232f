//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validation failures, converter classifications and node transport
//! faults to HTTP status codes with a JSON body of the form
//! `{"error": {"code", "message"}}`.
//!
//! The three converter classifications keep their wire identifiers as the
//! error code. `ERROR_INVALID_INPUT` maps to 502 when the node sent the bad
//! data and to 422 when it arrived in a status push addressed to us.
//!
//! Payment manager failures follow the same split: bad credentials and
//! sessions are 401, outages are 502 with the cause kept in the logs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use pagopa_core::{ControllerError, ValidationError};
use pagopa_nodo::NodoError;
use pagopa_wallet::WalletError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "REQUEST_REJECTED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid bearer token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The node answered `KO` (409).
    #[error("request rejected: {0}")]
    RequestRejected(String),

    /// The node answered `OK` with data that does not decode (502).
    #[error("invalid node response: {0}")]
    InvalidNodeResponse(String),

    /// An inbound status push does not decode (422).
    #[error("invalid status push: {0}")]
    InvalidPush(String),

    /// Internal invariant broken (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),

    /// Node or payment manager transport fault (502). Message is logged but not returned to client.
    #[error("upstream error: {0}")]
    UpstreamError(String),

    /// Upstream adapter not configured (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::RequestRejected(_) => {
                (StatusCode::CONFLICT, ControllerError::RequestRejected.as_str())
            }
            Self::InvalidNodeResponse(_) => {
                (StatusCode::BAD_GATEWAY, ControllerError::ErrorInvalidInput.as_str())
            }
            Self::InvalidPush(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ControllerError::ErrorInvalidInput.as_str(),
            ),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ControllerError::ErrorInternal.as_str(),
            ),
            Self::UpstreamError(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }

    /// Construct a service unavailable error (503).
    pub fn service_unavailable(msg: &str) -> Self {
        Self::ServiceUnavailable(msg.to_string())
    }

    /// Classify a converter failure on an inbound status push.
    ///
    /// Unlike the node-response direction, bad push data is the caller's
    /// fault and answers 422.
    pub fn from_push(err: ControllerError) -> Self {
        match err {
            ControllerError::ErrorInvalidInput => {
                Self::InvalidPush("codiceContestoPagamento and idPagamento are required".into())
            }
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal or upstream error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            Self::UpstreamError(_) => "An upstream service error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::UpstreamError(_) => tracing::error!(error = %self, "upstream service error"),
            Self::InvalidNodeResponse(_) => {
                tracing::error!(error = %self, "pagoPA node response failed validation")
            }
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "service unavailable"),
            _ => {}
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert primitive validation errors to API errors.
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Convert converter classifications on the node-response path.
impl From<ControllerError> for AppError {
    fn from(err: ControllerError) -> Self {
        match err {
            ControllerError::RequestRejected => {
                Self::RequestRejected("the pagoPA node rejected the request".into())
            }
            ControllerError::ErrorInvalidInput => {
                Self::InvalidNodeResponse("the pagoPA node response failed validation".into())
            }
            ControllerError::ErrorInternal => Self::Internal(err.as_str().into()),
        }
    }
}

/// Convert node transport faults to API errors.
impl From<NodoError> for AppError {
    fn from(err: NodoError) -> Self {
        Self::UpstreamError(err.to_string())
    }
}

/// Convert payment manager failures to API errors.
impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::InvalidCredentials | WalletError::InvalidSession => {
                Self::Unauthorized(err.to_string())
            }
            WalletError::TransactionNotFound { .. } => Self::NotFound(err.to_string()),
            WalletError::InvalidPage { .. } => Self::Validation(err.to_string()),
            WalletError::ServiceUnavailable { .. } | WalletError::Timeout { .. } => {
                Self::UpstreamError(err.to_string())
            }
        }
    }
}
