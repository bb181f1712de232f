//! # pagopa-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for the pagoPA proxy.
//! Binds to configurable port (default 3000).

use std::sync::Arc;

use pagopa_api::state::{AppConfig, AppState, NodoClient};
use pagopa_core::PagoPaConfig;
use pagopa_nodo::{MockNodoAdapter, NodoAdapter};
use pagopa_wallet::{MockWalletAdapter, WalletAdapter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let port = config.port;

    // Node identifiers are optional at startup; without them the
    // node-backed routes answer 503.
    let nodo = match PagoPaConfig::from_env() {
        Ok(pagopa) => {
            let adapter = select_adapter()?;
            tracing::info!(
                adapter = adapter.adapter_name(),
                psp = %pagopa.identificativo_psp,
                "pagoPA node client configured"
            );
            Some(NodoClient::new(pagopa, adapter))
        }
        Err(e) => {
            tracing::warn!("pagoPA node not configured: {e}. Payment endpoints will return 503.");
            None
        }
    };

    let wallet = select_wallet_adapter()?;
    tracing::info!(adapter = wallet.adapter_name(), "payment manager client configured");

    let state = AppState::with_config(config, nodo).with_wallet(wallet);
    let app = pagopa_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("pagoPA proxy listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the node adapter named by `PAGOPA_NODO_ADAPTER` (default `mock`).
fn select_adapter() -> Result<Arc<dyn NodoAdapter>, Box<dyn std::error::Error>> {
    let name = std::env::var("PAGOPA_NODO_ADAPTER").unwrap_or_else(|_| "mock".to_string());
    match name.as_str() {
        "mock" => Ok(Arc::new(MockNodoAdapter)),
        other => {
            tracing::error!(adapter = other, "unknown pagoPA node adapter");
            Err(format!("unknown PAGOPA_NODO_ADAPTER: {other}").into())
        }
    }
}

/// Pick the payment manager adapter named by `PAGOPA_WALLET_ADAPTER` (default `mock`).
fn select_wallet_adapter() -> Result<Arc<dyn WalletAdapter>, Box<dyn std::error::Error>> {
    let name = std::env::var("PAGOPA_WALLET_ADAPTER").unwrap_or_else(|_| "mock".to_string());
    match name.as_str() {
        "mock" => Ok(Arc::new(MockWalletAdapter)),
        other => {
            tracing::error!(adapter = other, "unknown payment manager adapter");
            Err(format!("unknown PAGOPA_WALLET_ADAPTER: {other}").into())
        }
    }
}
