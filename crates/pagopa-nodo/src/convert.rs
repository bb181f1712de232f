//! # Converters
//!
//! Pure functions between controller records and node messages.
//!
//! Request direction (controller → node) is total: the inputs are already
//! validated, so the node message is a reshaping of them plus the fixed
//! configuration identifiers.
//!
//! Response direction (node → controller) follows one pattern:
//!
//! 1. `esito == KO` → [`ControllerError::RequestRejected`]. Nothing else is
//!    inspected.
//! 2. Otherwise the node's nested `datiPagamentoPA` is flattened into the
//!    controller shape as a JSON value, and the whole value is decoded into
//!    the validated record in one step.
//! 3. Any decode failure → [`ControllerError::ErrorInvalidInput`]. No
//!    partially populated record is ever returned.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use pagopa_core::{
    CodiceContestoPagamento, ControllerError, Importo, PagoPaConfig, PaymentsActivationRequest,
    PaymentsActivationResponse, PaymentsCheckRequest, PaymentsCheckResponse,
    PaymentsStatusUpdateRequest,
};

use crate::wire::{
    CdInfoWispInput, CodificaInfrastrutturaPsp, DatiPagamentoPa, DatiPagamentoPsp,
    EnteBeneficiario, Esito, NodoAttivaRptInput, NodoAttivaRptOutput, NodoVerificaRptInput,
    NodoVerificaRptOutput,
};

/// Beneficiary identifier name on the check path.
const CHECK_BENEFICIARY_ID: &str = "codiceIdentificativoUnivoco";

/// Beneficiary identifier name on the activation path.
const ACTIVATION_BENEFICIARY_ID: &str = "identificativoUnivocoBeneficiario";

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Build the `nodoVerificaRPT` input for a payment check.
pub fn payments_check_request_to_nodo(
    config: &PagoPaConfig,
    request: &PaymentsCheckRequest,
    codice_contesto_pagamento: &CodiceContestoPagamento,
) -> NodoVerificaRptInput {
    NodoVerificaRptInput {
        identificativo_psp: config.identificativo_psp.clone(),
        identificativo_intermediario_psp: config.identificativo_intermediario_psp.clone(),
        identificativo_canale: config.identificativo_canale.clone(),
        password: config.password.clone(),
        codice_contesto_pagamento: codice_contesto_pagamento.clone(),
        codifica_infrastruttura_psp: CodificaInfrastrutturaPsp::QrCode,
        codice_id_rpt: request.codice_id_rpt().clone(),
    }
}

/// Interpret a `nodoVerificaRPT` response.
///
/// `codice_contesto_pagamento` is the token the check was issued with; it is
/// copied into the response so the caller can use it for activation.
pub fn nodo_verifica_output_to_check_response(
    output: &NodoVerificaRptOutput,
    codice_contesto_pagamento: &CodiceContestoPagamento,
) -> Result<PaymentsCheckResponse, ControllerError> {
    let risposta = &output.nodo_verifica_rpt_risposta;
    if risposta.esito == Esito::Ko {
        return Err(ControllerError::RequestRejected);
    }
    let dati = risposta
        .dati_pagamento_pa
        .as_ref()
        .ok_or(ControllerError::ErrorInvalidInput)?;

    let importo = node_amount(dati)?;

    let mut flat = flatten_dati_pagamento(dati, CHECK_BENEFICIARY_ID);
    flat.insert(
        "codiceContestoPagamento".into(),
        Value::String(codice_contesto_pagamento.as_str().to_string()),
    );
    let response: PaymentsCheckResponse = decode(Value::Object(flat))?;
    ensure_amount(response.importo_singolo_versamento(), importo)?;
    Ok(response)
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// Build the `nodoAttivaRPT` input for a payment activation.
pub fn payments_activation_request_to_nodo(
    config: &PagoPaConfig,
    request: &PaymentsActivationRequest,
) -> NodoAttivaRptInput {
    NodoAttivaRptInput {
        identificativo_psp: config.identificativo_psp.clone(),
        identificativo_intermediario_psp: config.identificativo_intermediario_psp.clone(),
        identificativo_canale: config.identificativo_canale.clone(),
        password: config.password.clone(),
        codice_contesto_pagamento: request.codice_contesto_pagamento().clone(),
        identificativo_intermediario_psp_pagamento: config
            .identificativo_intermediario_psp
            .clone(),
        identificativo_canale_pagamento: config.identificativo_canale.clone(),
        codifica_infrastruttura_psp: CodificaInfrastrutturaPsp::QrCode,
        codice_id_rpt: request.codice_id_rpt().clone(),
        dati_pagamento_psp: DatiPagamentoPsp {
            importo_singolo_versamento: request.importo_singolo_versamento(),
        },
    }
}

/// Interpret a `nodoAttivaRPT` response.
pub fn nodo_attiva_output_to_activation_response(
    output: &NodoAttivaRptOutput,
) -> Result<PaymentsActivationResponse, ControllerError> {
    let risposta = &output.nodo_attiva_rpt_risposta;
    if risposta.esito == Esito::Ko {
        return Err(ControllerError::RequestRejected);
    }
    let dati = risposta
        .dati_pagamento_pa
        .as_ref()
        .ok_or(ControllerError::ErrorInvalidInput)?;

    let importo = node_amount(dati)?;

    let response: PaymentsActivationResponse =
        decode(Value::Object(flatten_dati_pagamento(dati, ACTIVATION_BENEFICIARY_ID)))?;
    ensure_amount(response.importo_singolo_versamento(), importo)?;
    Ok(response)
}

// ---------------------------------------------------------------------------
// Status push
// ---------------------------------------------------------------------------

/// Validate a `cdInfoWisp` push from the node.
pub fn cd_info_wisp_to_status_update(
    input: &CdInfoWispInput,
) -> Result<PaymentsStatusUpdateRequest, ControllerError> {
    decode(json!({
        "codiceContestoPagamento": input.codice_contesto_pagamento,
        "idPagamento": input.id_pagamento,
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Range-check the node amount on its exact decimal value.
///
/// The JSON number carrying the amount into the decode step is an `f64`,
/// which can round an out-of-range value such as `0.10999999999999999999`
/// into range.
fn node_amount(dati: &DatiPagamentoPa) -> Result<Importo, ControllerError> {
    let raw = dati
        .importo_singolo_versamento
        .ok_or(ControllerError::ErrorInvalidInput)?;
    Importo::new(raw).map_err(|_| ControllerError::ErrorInvalidInput)
}

/// The decoded amount must equal the node's amount exactly.
fn ensure_amount(decoded: Importo, expected: Importo) -> Result<(), ControllerError> {
    if decoded != expected {
        return Err(ControllerError::ErrorInvalidInput);
    }
    Ok(())
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ControllerError> {
    serde_json::from_value(value).map_err(|_| ControllerError::ErrorInvalidInput)
}

fn flatten_dati_pagamento(dati: &DatiPagamentoPa, beneficiary_id_field: &str) -> Map<String, Value> {
    let mut flat = Map::new();
    flat.insert(
        "importoSingoloVersamento".into(),
        json!(dati.importo_singolo_versamento),
    );
    flat.insert("ibanAccredito".into(), json!(dati.iban_accredito));
    flat.insert("causaleVersamento".into(), json!(dati.causale_versamento));
    flat.insert(
        "enteBeneficiario".into(),
        dati.ente_beneficiario
            .as_ref()
            .map_or(Value::Null, |ente| beneficiary(ente, beneficiary_id_field)),
    );
    flat.insert(
        "spezzoniCausaleVersamento".into(),
        json!(dati.spezzoni_causale_versamento),
    );
    flat
}

fn beneficiary(ente: &EnteBeneficiario, id_field: &str) -> Value {
    let mut fields = Map::new();
    fields.insert(
        id_field.to_string(),
        json!(ente.identificativo_univoco_beneficiario),
    );
    let details = [
        ("denominazioneBeneficiario", &ente.denominazione_beneficiario),
        ("codiceUnitOperBeneficiario", &ente.codice_unit_oper_beneficiario),
        ("denomUnitOperBeneficiario", &ente.denom_unit_oper_beneficiario),
        ("indirizzoBeneficiario", &ente.indirizzo_beneficiario),
        ("civicoBeneficiario", &ente.civico_beneficiario),
        ("capBeneficiario", &ente.cap_beneficiario),
        ("localitaBeneficiario", &ente.localita_beneficiario),
        ("provinciaBeneficiario", &ente.provincia_beneficiario),
        ("nazioneBeneficiario", &ente.nazione_beneficiario),
    ];
    for (name, value) in details {
        fields.insert(name.to_string(), json!(value));
    }
    Value::Object(fields)
}
