//! # Wallet Routes

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use pagopa_wallet::Wallet;

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::routes::users::TokenQuery;
use crate::routes::{require_wallet, run_adapter};
use crate::state::AppState;

/// Build the wallet router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/wallet", get(list_wallets))
}

#[derive(Debug, Serialize)]
pub struct WalletListResponse {
    pub data: Vec<Wallet>,
}

/// GET /v1/wallet?token=
async fn list_wallets(
    State(state): State<AppState>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<WalletListResponse>, AppError> {
    let session = extract_query(query)?.into_session()?;
    let wallet = require_wallet(&state)?;

    let data = run_adapter(wallet, move |adapter| adapter.wallets(&session)).await?;
    tracing::debug!(count = data.len(), "wallets listed");
    Ok(Json(WalletListResponse { data }))
}
