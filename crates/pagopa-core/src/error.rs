//! # Error Types
//!
//! Two layers of errors:
//!
//! - [`ValidationError`]: a single primitive failed its format or range
//!   rule. Carries the rejected raw value for diagnostics.
//! - [`ControllerError`]: the closed classification returned by every
//!   converter and by the session token generator. Controllers map each
//!   classification to a distinct HTTP status.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Validation failure for a payment primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value does not contain a well-formed IBAN.
    #[error("invalid IBAN: {0:?}")]
    InvalidIban(String),

    /// Value is not an Italian fiscal code.
    #[error("invalid fiscal code: {0:?}")]
    InvalidFiscalCode(String),

    /// Value does not contain a 15 or 17 digit IUV.
    #[error("invalid IUV: {0:?}")]
    InvalidIuv(String),

    /// AuxDigit outside `{0, 1, 2, 3}`.
    #[error("invalid AuxDigit: {0:?} (expected one of 0, 1, 2, 3)")]
    InvalidAuxDigit(String),

    /// Station code does not contain two digits.
    #[error("invalid station code: {0:?}")]
    InvalidStationCode(String),

    /// Amount outside the inclusive range accepted by the node.
    #[error("amount {0} outside the accepted range [0.11, 999999.99]")]
    AmountOutOfRange(String),

    /// Session context token is empty, too long, or not alphanumeric.
    #[error("invalid codiceContestoPagamento: {0:?}")]
    InvalidSessionToken(String),

    /// Payment instance identifier is blank or too long.
    #[error("invalid idPagamento: {0:?}")]
    InvalidPaymentId(String),

    /// Notification installation identifier is blank.
    #[error("invalid installationId: {0:?}")]
    InvalidInstallationId(String),
}

/// Classification of a failed conversion.
///
/// Serialized in `SCREAMING_SNAKE_CASE`; the string identifiers are part of
/// the HTTP error contract and must not change.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ControllerError {
    /// Decoding an assembled response or an inbound push payload failed.
    #[error("ERROR_INVALID_INPUT")]
    ErrorInvalidInput,

    /// The node answered `esito = KO` to an otherwise well-formed call.
    #[error("REQUEST_REJECTED")]
    RequestRejected,

    /// An internal invariant broke, independent of caller input.
    #[error("ERROR_INTERNAL")]
    ErrorInternal,
}

impl ControllerError {
    /// Returns all classifications in declaration order.
    pub fn all() -> &'static [ControllerError] {
        &[
            Self::ErrorInvalidInput,
            Self::RequestRejected,
            Self::ErrorInternal,
        ]
    }

    /// Returns the wire identifier of this classification.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ErrorInvalidInput => "ERROR_INVALID_INPUT",
            Self::RequestRejected => "REQUEST_REJECTED",
            Self::ErrorInternal => "ERROR_INTERNAL",
        }
    }
}

impl FromStr for ControllerError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ERROR_INVALID_INPUT" => Ok(Self::ErrorInvalidInput),
            "REQUEST_REJECTED" => Ok(Self::RequestRejected),
            "ERROR_INTERNAL" => Ok(Self::ErrorInternal),
            other => Err(format!("unknown controller error: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_classifications_unique() {
        let mut seen = std::collections::HashSet::new();
        for c in ControllerError::all() {
            assert!(seen.insert(c.as_str()), "duplicate classification: {c}");
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn as_str_roundtrip() {
        for c in ControllerError::all() {
            let parsed: ControllerError = c.as_str().parse().unwrap();
            assert_eq!(*c, parsed);
        }
    }

    #[test]
    fn from_str_is_case_sensitive() {
        assert!("request_rejected".parse::<ControllerError>().is_err());
        assert!("".parse::<ControllerError>().is_err());
    }

    #[test]
    fn display_matches_wire_identifier() {
        for c in ControllerError::all() {
            assert_eq!(c.to_string(), c.as_str());
        }
    }

    #[test]
    fn serde_format_matches_as_str() {
        for c in ControllerError::all() {
            let json = serde_json::to_string(c).unwrap();
            assert_eq!(json, format!("\"{}\"", c.as_str()));
        }
    }

    #[test]
    fn validation_error_messages_carry_value() {
        let err = ValidationError::InvalidIban("XX".into());
        assert!(err.to_string().contains("XX"));

        let err = ValidationError::AmountOutOfRange("0.10".into());
        assert!(err.to_string().contains("0.10"));
        assert!(err.to_string().contains("999999.99"));
    }
}
