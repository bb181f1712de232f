//! # API Route Modules
//!
//! - `payments`: check and activate against the pagoPA node, plus the
//!   node's status push and its lookup.
//! - `notifications`: notification subscription activation/deactivation.
//! - `users`: payment manager sessions, identified or anonymous.
//! - `wallet`: the citizen's stored payment methods.
//! - `transactions`: the citizen's transaction history.

pub mod notifications;
pub mod payments;
pub mod transactions;
pub mod users;
pub mod wallet;

use std::sync::Arc;

use pagopa_wallet::WalletAdapter;

use crate::error::AppError;
use crate::state::AppState;

/// Run a synchronous adapter call on the blocking pool.
pub(crate) async fn run_adapter<A, T, E, F>(adapter: &Arc<A>, call: F) -> Result<T, AppError>
where
    A: ?Sized + Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
    AppError: From<E>,
    F: FnOnce(&A) -> Result<T, E> + Send + 'static,
{
    let adapter = Arc::clone(adapter);
    let result = tokio::task::spawn_blocking(move || call(adapter.as_ref()))
        .await
        .map_err(|e| AppError::Internal(format!("adapter task failed: {e}")))?;
    Ok(result?)
}

/// Extract the payment manager adapter from AppState or return 503.
pub(crate) fn require_wallet(state: &AppState) -> Result<&Arc<dyn WalletAdapter>, AppError> {
    state
        .wallet
        .as_ref()
        .map(|client| &client.adapter)
        .ok_or_else(|| {
            AppError::service_unavailable(
                "payment manager not configured. Set PAGOPA_WALLET_ADAPTER.",
            )
        })
}
