//! # Transaction History Routes
//!
//! The list is paged with `start` (offset, default 0) and `size` (default
//! 20, at most 100); the page actually applied is echoed back.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use pagopa_wallet::{Page, SessionToken, Transaction};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::routes::users::TokenQuery;
use crate::routes::{require_wallet, run_adapter};
use crate::state::AppState;

/// Build the transactions router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/transactions", get(list_transactions))
        .route("/v1/transactions/:id", get(get_transaction))
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    token: String,
    start: Option<usize>,
    size: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TransactionListResponse {
    pub data: Vec<Transaction>,
    pub start: usize,
    pub size: usize,
}

/// GET /v1/transactions?token=&start=&size=
async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let ListQuery { token, start, size } = extract_query(query)?;
    let session = SessionToken::new(token)?;
    let page = Page::new(start, size)?;
    let wallet = require_wallet(&state)?;

    let data = run_adapter(wallet, move |adapter| adapter.transactions(&session, page)).await?;
    Ok(Json(TransactionListResponse {
        data,
        start: page.start(),
        size: page.size(),
    }))
}

/// GET /v1/transactions/:id?token=
async fn get_transaction(
    State(state): State<AppState>,
    id: Result<Path<u64>, PathRejection>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Transaction>, AppError> {
    let Path(id) = id.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let session = extract_query(query)?.into_session()?;
    let wallet = require_wallet(&state)?;

    let transaction = run_adapter(wallet, move |adapter| adapter.transaction(&session, id)).await?;
    Ok(Json(transaction))
}
