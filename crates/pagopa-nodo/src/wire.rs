//! # Node Message Shapes
//!
//! Request and response bodies of the node's `PPTPort` operations. Field
//! names, nesting and enumeration values match the node contract verbatim;
//! any deviation is an interoperability failure.
//!
//! Inputs are built from validated records, so their fields are typed.
//! Outputs come from the node and are kept loose (`Option` everywhere below
//! the outcome flag) so that a malformed answer reaches the converters'
//! decode step instead of failing inside the transport.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pagopa_core::{CodiceContestoPagamento, CodiceIdRpt, Importo};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Outcome flag of a node response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Esito {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "KO")]
    Ko,
}

/// How the notice reached the PSP. This proxy only handles QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodificaInfrastrutturaPsp {
    #[serde(rename = "QR_CODE")]
    QrCode,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Body of a `nodoVerificaRPT` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoVerificaRptInput {
    #[serde(rename = "identificativoPSP")]
    pub identificativo_psp: String,
    #[serde(rename = "identificativoIntermediarioPSP")]
    pub identificativo_intermediario_psp: String,
    #[serde(rename = "identificativoCanale")]
    pub identificativo_canale: String,
    pub password: String,
    #[serde(rename = "codiceContestoPagamento")]
    pub codice_contesto_pagamento: CodiceContestoPagamento,
    #[serde(rename = "codificaInfrastrutturaPSP")]
    pub codifica_infrastruttura_psp: CodificaInfrastrutturaPsp,
    #[serde(rename = "codiceIdRPT")]
    pub codice_id_rpt: CodiceIdRpt,
}

/// PSP-side payment data of an activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatiPagamentoPsp {
    #[serde(rename = "importoSingoloVersamento")]
    pub importo_singolo_versamento: Importo,
}

/// Body of a `nodoAttivaRPT` call.
///
/// The channel identity is carried twice: once for the actor making the
/// inquiry and once for the paying actor (`...Pagamento` fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoAttivaRptInput {
    #[serde(rename = "identificativoPSP")]
    pub identificativo_psp: String,
    #[serde(rename = "identificativoIntermediarioPSP")]
    pub identificativo_intermediario_psp: String,
    #[serde(rename = "identificativoCanale")]
    pub identificativo_canale: String,
    pub password: String,
    #[serde(rename = "codiceContestoPagamento")]
    pub codice_contesto_pagamento: CodiceContestoPagamento,
    #[serde(rename = "identificativoIntermediarioPSPPagamento")]
    pub identificativo_intermediario_psp_pagamento: String,
    #[serde(rename = "identificativoCanalePagamento")]
    pub identificativo_canale_pagamento: String,
    #[serde(rename = "codificaInfrastrutturaPSP")]
    pub codifica_infrastruttura_psp: CodificaInfrastrutturaPsp,
    #[serde(rename = "codiceIdRPT")]
    pub codice_id_rpt: CodiceIdRpt,
    #[serde(rename = "datiPagamentoPSP")]
    pub dati_pagamento_psp: DatiPagamentoPsp,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Fault details attached to a `KO` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaultBean {
    pub fault_code: String,
    pub fault_string: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<i32>,
}

/// Creditor entity as described by the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnteBeneficiario {
    pub identificativo_univoco_beneficiario: Option<String>,
    pub denominazione_beneficiario: Option<String>,
    pub codice_unit_oper_beneficiario: Option<String>,
    pub denom_unit_oper_beneficiario: Option<String>,
    pub indirizzo_beneficiario: Option<String>,
    pub civico_beneficiario: Option<String>,
    pub cap_beneficiario: Option<String>,
    pub localita_beneficiario: Option<String>,
    pub provincia_beneficiario: Option<String>,
    pub nazione_beneficiario: Option<String>,
}

/// Creditor-side payment data returned on an `OK` outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatiPagamentoPa {
    pub importo_singolo_versamento: Option<Decimal>,
    pub iban_accredito: Option<String>,
    pub causale_versamento: Option<String>,
    pub ente_beneficiario: Option<EnteBeneficiario>,
    pub spezzoni_causale_versamento: Option<Vec<String>>,
}

/// Inner response of `nodoVerificaRPT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoVerificaRptRisposta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultBean>,
    pub esito: Esito,
    #[serde(
        rename = "datiPagamentoPA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dati_pagamento_pa: Option<DatiPagamentoPa>,
}

/// Response envelope of `nodoVerificaRPT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoVerificaRptOutput {
    #[serde(rename = "nodoVerificaRPTRisposta")]
    pub nodo_verifica_rpt_risposta: NodoVerificaRptRisposta,
}

/// Inner response of `nodoAttivaRPT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoAttivaRptRisposta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fault: Option<FaultBean>,
    pub esito: Esito,
    #[serde(
        rename = "datiPagamentoPA",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dati_pagamento_pa: Option<DatiPagamentoPa>,
}

/// Response envelope of `nodoAttivaRPT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodoAttivaRptOutput {
    #[serde(rename = "nodoAttivaRPTRisposta")]
    pub nodo_attiva_rpt_risposta: NodoAttivaRptRisposta,
}

// ---------------------------------------------------------------------------
// Status push
// ---------------------------------------------------------------------------

/// Body of a `cdInfoWisp` push from the node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CdInfoWispInput {
    pub codice_contesto_pagamento: Option<String>,
    pub id_pagamento: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn esito_wire_values() {
        assert_eq!(serde_json::to_string(&Esito::Ok).unwrap(), "\"OK\"");
        assert_eq!(serde_json::to_string(&Esito::Ko).unwrap(), "\"KO\"");
        assert!(serde_json::from_str::<Esito>("\"ok\"").is_err());
    }

    #[test]
    fn codifica_wire_value() {
        assert_eq!(
            serde_json::to_string(&CodificaInfrastrutturaPsp::QrCode).unwrap(),
            "\"QR_CODE\""
        );
    }

    #[test]
    fn verifica_output_decodes_node_json() {
        let output: NodoVerificaRptOutput = serde_json::from_value(json!({
            "nodoVerificaRPTRisposta": {
                "esito": "OK",
                "datiPagamentoPA": {
                    "importoSingoloVersamento": 120.5,
                    "ibanAccredito": "IT60X0542811101000000123456",
                    "causaleVersamento": "TARI",
                    "enteBeneficiario": {
                        "identificativoUnivocoBeneficiario": "80000000001",
                        "denominazioneBeneficiario": "Comune di Roma"
                    }
                }
            }
        }))
        .unwrap();
        let risposta = output.nodo_verifica_rpt_risposta;
        assert_eq!(risposta.esito, Esito::Ok);
        let ente = risposta.dati_pagamento_pa.unwrap().ente_beneficiario.unwrap();
        assert_eq!(ente.identificativo_univoco_beneficiario.as_deref(), Some("80000000001"));
        assert!(ente.cap_beneficiario.is_none());
    }

    #[test]
    fn ko_output_carries_fault() {
        let output: NodoAttivaRptOutput = serde_json::from_value(json!({
            "nodoAttivaRPTRisposta": {
                "esito": "KO",
                "fault": {
                    "faultCode": "PPT_PAGAMENTO_DUPLICATO",
                    "faultString": "Pagamento duplicato",
                    "id": "NodoDeiPagamentiSPC"
                }
            }
        }))
        .unwrap();
        let risposta = output.nodo_attiva_rpt_risposta;
        assert_eq!(risposta.esito, Esito::Ko);
        assert_eq!(risposta.fault.unwrap().fault_code, "PPT_PAGAMENTO_DUPLICATO");
        assert!(risposta.dati_pagamento_pa.is_none());
    }

    #[test]
    fn cd_info_wisp_tolerates_missing_fields() {
        let input: CdInfoWispInput = serde_json::from_value(json!({})).unwrap();
        assert_eq!(input, CdInfoWispInput::default());
    }
}
