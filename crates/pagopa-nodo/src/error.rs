//! Transport errors from the node adapter.
//!
//! These are faults of the call itself (the node could not be reached or
//! did not answer). A node that answers `KO` is not a transport fault; that
//! outcome travels inside the response and is classified by the converters.

/// Errors from pagoPA node adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum NodoError {
    /// Node is unreachable or returned a server error.
    #[error("pagoPA node unavailable: {reason}")]
    ServiceUnavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// The call to the node timed out.
    #[error("pagoPA node request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed time in milliseconds before the timeout triggered.
        elapsed_ms: u64,
    },

    /// The node answered with a message that is not a valid envelope.
    #[error("malformed pagoPA node response: {reason}")]
    MalformedResponse {
        /// What could not be parsed.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_carry_context() {
        let err = NodoError::ServiceUnavailable {
            reason: "connection refused".into(),
        };
        assert!(err.to_string().contains("connection refused"));

        let err = NodoError::Timeout { elapsed_ms: 3000 };
        assert!(err.to_string().contains("3000ms"));

        let err = NodoError::MalformedResponse {
            reason: "missing esito".into(),
        };
        assert!(err.to_string().contains("missing esito"));
    }
}
