//! # User Session Routes
//!
//! Open payment manager sessions. The session token returned here is what
//! the wallet and transaction routes expect in their `token` query parameter.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use pagopa_wallet::{Session, SessionToken, UserToken};

use crate::error::AppError;
use crate::extractors::extract_query;
use crate::routes::{require_wallet, run_adapter};
use crate::state::AppState;

/// Build the users router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/users/login", get(login))
        .route("/v1/users/login-anonymous", get(login_anonymous))
}

/// `?token=` carried by every session-scoped call.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenQuery {
    token: String,
}

impl TokenQuery {
    /// Interpret the token as an open session.
    pub(crate) fn into_session(self) -> Result<SessionToken, AppError> {
        Ok(SessionToken::new(self.token)?)
    }
}

/// GET /v1/users/login?token=
async fn login(
    State(state): State<AppState>,
    query: Result<Query<TokenQuery>, QueryRejection>,
) -> Result<Json<Session>, AppError> {
    let user = UserToken::new(extract_query(query)?.token)?;
    let wallet = require_wallet(&state)?;

    let session = run_adapter(wallet, move |adapter| adapter.login(&user)).await?;
    tracing::info!("payment manager session opened");
    Ok(Json(session))
}

/// GET /v1/users/login-anonymous
async fn login_anonymous(State(state): State<AppState>) -> Result<Json<Session>, AppError> {
    let wallet = require_wallet(&state)?;

    let session = run_adapter(wallet, |adapter| adapter.login_anonymous()).await?;
    tracing::info!(anonymous = true, "payment manager session opened");
    Ok(Json(session))
}
