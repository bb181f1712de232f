//! # pagopa-api: Axum HTTP Service for the pagoPA Proxy
//!
//! Exposes a small REST surface for payment operations and translates each
//! call into the pagoPA node's message layout through `pagopa-nodo`.
//! Session, wallet and transaction calls go to the payment manager through
//! `pagopa-wallet`.
//!
//! ## API Surface
//!
//! | Route                                         | Module                     |
//! |-----------------------------------------------|----------------------------|
//! | `POST /v1/payments/check`                     | [`routes::payments`]       |
//! | `POST /v1/payments/activation`                | [`routes::payments`]       |
//! | `POST /v1/payments/status`                    | [`routes::payments`]       |
//! | `GET  /v1/payments/status/:codiceContestoPagamento` | [`routes::payments`] |
//! | `POST /v1/notifications/activation`           | [`routes::notifications`]  |
//! | `POST /v1/notifications/deactivation`         | [`routes::notifications`]  |
//! | `GET  /v1/users/login`                        | [`routes::users`]          |
//! | `GET  /v1/users/login-anonymous`              | [`routes::users`]          |
//! | `GET  /v1/wallet`                             | [`routes::wallet`]         |
//! | `GET  /v1/transactions`                       | [`routes::transactions`]   |
//! | `GET  /v1/transactions/:id`                   | [`routes::transactions`]   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → BodyLimit → Handler
//! ```

pub mod auth;
pub mod error;
pub mod extractors;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::auth::AuthConfig;
use crate::state::AppState;

/// Request body limit for every authenticated route.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Health endpoints (`/health/*`) are mounted outside the auth middleware
/// so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        token: state.config.auth_token.clone(),
    };

    // Authenticated API routes.
    let api = Router::new()
        .merge(routes::payments::router())
        .merge(routes::notifications::router())
        .merge(routes::users::router())
        .merge(routes::wallet::router())
        .merge(routes::transactions::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn(auth::auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(auth_config))
        .with_state(state);

    // Unauthenticated health endpoints.
    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness: 200 once the router is serving.
async fn readiness() -> &'static str {
    "ready"
}
