//! Errors from the payment manager adapter.

/// Errors from payment manager operations.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The citizen credential is malformed or was refused.
    #[error("invalid user credentials")]
    InvalidCredentials,

    /// The session token is malformed, unknown or expired.
    #[error("invalid or expired session")]
    InvalidSession,

    /// The transaction does not exist or belongs to another citizen.
    #[error("transaction {id} not found")]
    TransactionNotFound {
        /// Requested transaction id.
        id: u64,
    },

    /// The requested history window is out of bounds.
    #[error("invalid page: {reason}")]
    InvalidPage {
        /// Which bound was violated.
        reason: String,
    },

    /// Payment manager is unreachable or returned a server error.
    #[error("payment manager unavailable: {reason}")]
    ServiceUnavailable {
        /// Human-readable description of the outage.
        reason: String,
    },

    /// The call to the payment manager timed out.
    #[error("payment manager request timed out after {elapsed_ms}ms")]
    Timeout {
        /// Elapsed time in milliseconds before the timeout triggered.
        elapsed_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_never_echo_credentials() {
        assert_eq!(WalletError::InvalidCredentials.to_string(), "invalid user credentials");
        assert_eq!(WalletError::InvalidSession.to_string(), "invalid or expired session");
    }

    #[test]
    fn messages_carry_context() {
        assert!(WalletError::TransactionNotFound { id: 42 }.to_string().contains("42"));
        assert!(WalletError::Timeout { elapsed_ms: 800 }.to_string().contains("800ms"));
    }
}
