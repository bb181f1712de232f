//! # Payment Routes
//!
//! Each node-backed handler follows the same path: decode the controller
//! request, build the node input with the converters, call the adapter on
//! the blocking pool, and interpret the node output.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use pagopa_core::{
    generate_codice_contesto_pagamento, CodiceContestoPagamento, PaymentsActivationRequest,
    PaymentsActivationResponse, PaymentsCheckRequest, PaymentsCheckResponse,
    PaymentsStatusUpdateRequest,
};
use pagopa_nodo::wire::{CdInfoWispInput, Esito, FaultBean};
use pagopa_nodo::{
    cd_info_wisp_to_status_update, nodo_attiva_output_to_activation_response,
    nodo_verifica_output_to_check_response, payments_activation_request_to_nodo,
    payments_check_request_to_nodo,
};

use crate::error::AppError;
use crate::extractors::extract_json;
use crate::routes::run_adapter;
use crate::state::{AppState, NodoClient};

/// Build the payments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/payments/check", post(check_payment))
        .route("/v1/payments/activation", post(activate_payment))
        .route("/v1/payments/status", post(update_payment_status))
        .route(
            "/v1/payments/status/:codiceContestoPagamento",
            get(get_payment_status),
        )
}

/// Helper: extract the node client from AppState or return 503.
fn require_nodo(state: &AppState) -> Result<&NodoClient, AppError> {
    state.nodo.as_ref().ok_or_else(|| {
        AppError::service_unavailable(
            "pagoPA node not configured. Set the PAGOPA_ID_* and PAGOPA_PASSWORD environment variables.",
        )
    })
}

fn log_rejection(operation: &str, esito: Esito, fault: Option<&FaultBean>) {
    if esito != Esito::Ko {
        return;
    }
    match fault {
        Some(fault) => tracing::warn!(
            operation,
            fault_code = %fault.fault_code,
            fault_string = %fault.fault_string,
            fault_id = %fault.id,
            description = fault.description.as_deref().unwrap_or(""),
            "pagoPA node answered KO"
        ),
        None => tracing::warn!(operation, "pagoPA node answered KO without fault details"),
    }
}

// -- Handlers -----------------------------------------------------------------

/// POST /v1/payments/check: check a payment notice.
///
/// Mints the session token that the caller must echo on activation.
async fn check_payment(
    State(state): State<AppState>,
    body: Result<Json<PaymentsCheckRequest>, JsonRejection>,
) -> Result<Json<PaymentsCheckResponse>, AppError> {
    let request = extract_json(body)?;
    let nodo = require_nodo(&state)?;

    let token = generate_codice_contesto_pagamento()?;
    let input = payments_check_request_to_nodo(&nodo.config, &request, &token);
    tracing::info!(
        codice_contesto_pagamento = %token,
        iuv = %request.codice_id_rpt().cod_iuv(),
        "sending nodoVerificaRPT"
    );

    let output = run_adapter(&nodo.adapter, move |adapter| adapter.verifica_rpt(&input)).await?;
    let risposta = &output.nodo_verifica_rpt_risposta;
    log_rejection("nodoVerificaRPT", risposta.esito, risposta.fault.as_ref());

    let response = nodo_verifica_output_to_check_response(&output, &token)?;
    Ok(Json(response))
}

/// POST /v1/payments/activation: activate a checked payment.
async fn activate_payment(
    State(state): State<AppState>,
    body: Result<Json<PaymentsActivationRequest>, JsonRejection>,
) -> Result<Json<PaymentsActivationResponse>, AppError> {
    let request = extract_json(body)?;
    let nodo = require_nodo(&state)?;

    let input = payments_activation_request_to_nodo(&nodo.config, &request);
    tracing::info!(
        codice_contesto_pagamento = %request.codice_contesto_pagamento(),
        iuv = %request.codice_id_rpt().cod_iuv(),
        importo = %request.importo_singolo_versamento(),
        "sending nodoAttivaRPT"
    );

    let output = run_adapter(&nodo.adapter, move |adapter| adapter.attiva_rpt(&input)).await?;
    let risposta = &output.nodo_attiva_rpt_risposta;
    log_rejection("nodoAttivaRPT", risposta.esito, risposta.fault.as_ref());

    let response = nodo_attiva_output_to_activation_response(&output)?;
    Ok(Json(response))
}

/// POST /v1/payments/status: status push (cdInfoWisp) from the node.
///
/// Records the payment instance id against the session token.
async fn update_payment_status(
    State(state): State<AppState>,
    body: Result<Json<CdInfoWispInput>, JsonRejection>,
) -> Result<Json<PaymentsStatusUpdateRequest>, AppError> {
    let input = extract_json(body)?;
    let update = cd_info_wisp_to_status_update(&input).map_err(AppError::from_push)?;

    let token = update.codice_contesto_pagamento().as_str().to_string();
    if let Some(previous) = state.payment_ids.insert(token, update.clone()) {
        tracing::info!(
            codice_contesto_pagamento = %update.codice_contesto_pagamento(),
            previous_id_pagamento = %previous.id_pagamento(),
            "replacing idPagamento for session token"
        );
    }
    tracing::info!(
        codice_contesto_pagamento = %update.codice_contesto_pagamento(),
        id_pagamento = %update.id_pagamento(),
        "payment status received"
    );
    Ok(Json(update))
}

/// GET /v1/payments/status/:codiceContestoPagamento: payment id for a token.
async fn get_payment_status(
    State(state): State<AppState>,
    Path(raw_token): Path<String>,
) -> Result<Json<PaymentsStatusUpdateRequest>, AppError> {
    let token = CodiceContestoPagamento::new(raw_token)?;
    state
        .payment_ids
        .get(&token.as_str().to_string())
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no payment status for {token}")))
}
