//! # pagoPA Node Adapter Interface
//!
//! The `NodoAdapter` trait abstracts over the node's `PPTPort` service.
//! Production deployments implement it against the live SOAP endpoint; test
//! environments use [`MockNodoAdapter`]. Controllers only see the typed
//! message shapes from [`crate::wire`], so the converters stay independent
//! of the transport.

use rust_decimal::Decimal;

use crate::error::NodoError;
use crate::wire::{
    DatiPagamentoPa, EnteBeneficiario, Esito, FaultBean, NodoAttivaRptInput, NodoAttivaRptOutput,
    NodoAttivaRptRisposta, NodoVerificaRptInput, NodoVerificaRptOutput, NodoVerificaRptRisposta,
};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Adapter trait for the pagoPA node.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support
/// runtime adapter selection (mock vs. live).
pub trait NodoAdapter: Send + Sync {
    /// Check a payment notice (`nodoVerificaRPT`).
    ///
    /// A `KO` outcome is a successful call; `Err` means the node was not
    /// reached or did not answer.
    fn verifica_rpt(&self, input: &NodoVerificaRptInput) -> Result<NodoVerificaRptOutput, NodoError>;

    /// Activate a checked payment (`nodoAttivaRPT`).
    fn attiva_rpt(&self, input: &NodoAttivaRptInput) -> Result<NodoAttivaRptOutput, NodoError>;

    /// Return the human-readable name of this adapter implementation
    /// (e.g. "MockNodoAdapter").
    fn adapter_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Mock adapter
// ---------------------------------------------------------------------------

/// Mock node adapter for testing and development.
///
/// Returns deterministic test data based on the IUV of the request:
/// - IUVs ending in "99" are answered `KO` with a fault bean
/// - IUVs ending in "98" are answered `OK` but the beneficiary lacks its
///   unique identifier
/// - IUVs ending in "97" fail with [`NodoError::ServiceUnavailable`]
/// - All other IUVs are answered `OK` with a complete payload
///
/// Checks report a fixed amount of EUR 120.50; activations echo the amount
/// from `datiPagamentoPSP`.
#[derive(Debug, Clone, Default)]
pub struct MockNodoAdapter;

impl MockNodoAdapter {
    /// Credit IBAN returned for every notice.
    pub const MOCK_IBAN: &'static str = "IT60X0542811101000000123456";

    /// Beneficiary identifier returned for every complete notice.
    pub const MOCK_BENEFICIARY_ID: &'static str = "80000000001";

    fn mock_amount() -> Decimal {
        Decimal::new(12050, 2)
    }

    fn outcome(iuv: &str) -> MockOutcome {
        if iuv.ends_with("99") {
            MockOutcome::Rejected
        } else if iuv.ends_with("98") {
            MockOutcome::MissingBeneficiaryId
        } else if iuv.ends_with("97") {
            MockOutcome::Unavailable
        } else {
            MockOutcome::Complete
        }
    }

    fn fault(iuv: &str) -> FaultBean {
        FaultBean {
            fault_code: "PPT_PAGAMENTO_SCONOSCIUTO".to_string(),
            fault_string: "Pagamento in attesa risulta sconosciuto all'Ente Creditore".to_string(),
            id: "NodoDeiPagamentiSPC".to_string(),
            description: Some(format!("IUV {iuv} not found")),
            serial: None,
        }
    }

    fn dati_pagamento(iuv: &str, amount: Decimal, with_id: bool) -> DatiPagamentoPa {
        DatiPagamentoPa {
            importo_singolo_versamento: Some(amount),
            iban_accredito: Some(Self::MOCK_IBAN.to_string()),
            causale_versamento: Some(format!("/RFB/{iuv}/{amount}")),
            ente_beneficiario: Some(EnteBeneficiario {
                identificativo_univoco_beneficiario: with_id
                    .then(|| Self::MOCK_BENEFICIARY_ID.to_string()),
                denominazione_beneficiario: Some("Comune di Test".to_string()),
                localita_beneficiario: Some("Roma".to_string()),
                provincia_beneficiario: Some("RM".to_string()),
                nazione_beneficiario: Some("IT".to_string()),
                ..EnteBeneficiario::default()
            }),
            spezzoni_causale_versamento: None,
        }
    }

    /// Shared `esito`/`fault`/`datiPagamentoPA` triple for both operations.
    fn respond(
        iuv: &str,
        amount: Decimal,
    ) -> Result<(Esito, Option<FaultBean>, Option<DatiPagamentoPa>), NodoError> {
        match Self::outcome(iuv) {
            MockOutcome::Rejected => Ok((Esito::Ko, Some(Self::fault(iuv)), None)),
            MockOutcome::MissingBeneficiaryId => Ok((
                Esito::Ok,
                None,
                Some(Self::dati_pagamento(iuv, amount, false)),
            )),
            MockOutcome::Unavailable => Err(NodoError::ServiceUnavailable {
                reason: format!("mock node unavailable for IUV {iuv}"),
            }),
            MockOutcome::Complete => Ok((
                Esito::Ok,
                None,
                Some(Self::dati_pagamento(iuv, amount, true)),
            )),
        }
    }
}

enum MockOutcome {
    Rejected,
    MissingBeneficiaryId,
    Unavailable,
    Complete,
}

impl NodoAdapter for MockNodoAdapter {
    fn verifica_rpt(&self, input: &NodoVerificaRptInput) -> Result<NodoVerificaRptOutput, NodoError> {
        let iuv = input.codice_id_rpt.cod_iuv().as_str();
        let (esito, fault, dati_pagamento_pa) = Self::respond(iuv, Self::mock_amount())?;
        Ok(NodoVerificaRptOutput {
            nodo_verifica_rpt_risposta: NodoVerificaRptRisposta {
                fault,
                esito,
                dati_pagamento_pa,
            },
        })
    }

    fn attiva_rpt(&self, input: &NodoAttivaRptInput) -> Result<NodoAttivaRptOutput, NodoError> {
        let iuv = input.codice_id_rpt.cod_iuv().as_str();
        let amount = input.dati_pagamento_psp.importo_singolo_versamento.value();
        let (esito, fault, dati_pagamento_pa) = Self::respond(iuv, amount)?;
        Ok(NodoAttivaRptOutput {
            nodo_attiva_rpt_risposta: NodoAttivaRptRisposta {
                fault,
                esito,
                dati_pagamento_pa,
            },
        })
    }

    fn adapter_name(&self) -> &str {
        "MockNodoAdapter"
    }
}
