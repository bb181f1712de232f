//! # Payment Request/Response Records
//!
//! Controller-facing records for the check → activate → status flow. JSON
//! field names are the node's names, verbatim.
//!
//! Records are immutable: fields are private and exposed through read
//! accessors. Request records are built from validated primitives with
//! `new()`; response records only come into existence by decoding, which is
//! all-or-nothing (`serde` fails the whole record on the first bad field).
//!
//! ## Beneficiary naming
//!
//! The beneficiary's unique identifier is named differently on the two
//! response paths: `codiceIdentificativoUnivoco` in [`CheckBeneficiary`],
//! `identificativoUnivocoBeneficiario` in [`Beneficiary`]. Both names are
//! part of the published contract and are kept as-is.

use serde::{Deserialize, Serialize};

use crate::types::{CodiceContestoPagamento, CodiceIdRpt, IdPagamento, Iban, Importo};

// ---------------------------------------------------------------------------
// Beneficiary
// ---------------------------------------------------------------------------

/// Descriptive fields shared by both beneficiary shapes.
///
/// Only the legal name is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryDetails {
    denominazione_beneficiario: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    codice_unit_oper_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    denom_unit_oper_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    indirizzo_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    civico_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cap_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    localita_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    provincia_beneficiario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nazione_beneficiario: Option<String>,
}

impl BeneficiaryDetails {
    pub fn denominazione_beneficiario(&self) -> &str {
        &self.denominazione_beneficiario
    }

    pub fn codice_unit_oper_beneficiario(&self) -> Option<&str> {
        self.codice_unit_oper_beneficiario.as_deref()
    }

    pub fn denom_unit_oper_beneficiario(&self) -> Option<&str> {
        self.denom_unit_oper_beneficiario.as_deref()
    }

    pub fn indirizzo_beneficiario(&self) -> Option<&str> {
        self.indirizzo_beneficiario.as_deref()
    }

    pub fn civico_beneficiario(&self) -> Option<&str> {
        self.civico_beneficiario.as_deref()
    }

    pub fn cap_beneficiario(&self) -> Option<&str> {
        self.cap_beneficiario.as_deref()
    }

    pub fn localita_beneficiario(&self) -> Option<&str> {
        self.localita_beneficiario.as_deref()
    }

    pub fn provincia_beneficiario(&self) -> Option<&str> {
        self.provincia_beneficiario.as_deref()
    }

    pub fn nazione_beneficiario(&self) -> Option<&str> {
        self.nazione_beneficiario.as_deref()
    }
}

/// Beneficiary as returned by a payment check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckBeneficiary {
    codice_identificativo_univoco: String,
    #[serde(flatten)]
    details: BeneficiaryDetails,
}

impl CheckBeneficiary {
    /// Unique identifier of the creditor entity.
    pub fn codice_identificativo_univoco(&self) -> &str {
        &self.codice_identificativo_univoco
    }

    pub fn details(&self) -> &BeneficiaryDetails {
        &self.details
    }
}

/// Beneficiary as returned by a payment activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    identificativo_univoco_beneficiario: String,
    #[serde(flatten)]
    details: BeneficiaryDetails,
}

impl Beneficiary {
    /// Unique identifier of the creditor entity.
    pub fn identificativo_univoco_beneficiario(&self) -> &str {
        &self.identificativo_univoco_beneficiario
    }

    pub fn details(&self) -> &BeneficiaryDetails {
        &self.details
    }
}

// ---------------------------------------------------------------------------
// Check
// ---------------------------------------------------------------------------

/// Request to check a payment notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentsCheckRequest {
    #[serde(rename = "codiceIdRPT")]
    codice_id_rpt: CodiceIdRpt,
}

impl PaymentsCheckRequest {
    pub fn new(codice_id_rpt: CodiceIdRpt) -> Self {
        Self { codice_id_rpt }
    }

    pub fn codice_id_rpt(&self) -> &CodiceIdRpt {
        &self.codice_id_rpt
    }
}

/// Outcome of a successful payment check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsCheckResponse {
    importo_singolo_versamento: Importo,
    codice_contesto_pagamento: CodiceContestoPagamento,
    iban_accredito: Iban,
    causale_versamento: String,
    ente_beneficiario: CheckBeneficiary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spezzoni_causale_versamento: Option<Vec<String>>,
}

impl PaymentsCheckResponse {
    pub fn importo_singolo_versamento(&self) -> Importo {
        self.importo_singolo_versamento
    }

    /// Session token to echo in the activation call.
    pub fn codice_contesto_pagamento(&self) -> &CodiceContestoPagamento {
        &self.codice_contesto_pagamento
    }

    pub fn iban_accredito(&self) -> &Iban {
        &self.iban_accredito
    }

    pub fn causale_versamento(&self) -> &str {
        &self.causale_versamento
    }

    pub fn ente_beneficiario(&self) -> &CheckBeneficiary {
        &self.ente_beneficiario
    }

    pub fn spezzoni_causale_versamento(&self) -> Option<&[String]> {
        self.spezzoni_causale_versamento.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Activation
// ---------------------------------------------------------------------------

/// Request to activate a previously checked payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsActivationRequest {
    #[serde(rename = "codiceIdRPT")]
    codice_id_rpt: CodiceIdRpt,
    codice_contesto_pagamento: CodiceContestoPagamento,
    importo_singolo_versamento: Importo,
}

impl PaymentsActivationRequest {
    pub fn new(
        codice_id_rpt: CodiceIdRpt,
        codice_contesto_pagamento: CodiceContestoPagamento,
        importo_singolo_versamento: Importo,
    ) -> Self {
        Self {
            codice_id_rpt,
            codice_contesto_pagamento,
            importo_singolo_versamento,
        }
    }

    pub fn codice_id_rpt(&self) -> &CodiceIdRpt {
        &self.codice_id_rpt
    }

    pub fn codice_contesto_pagamento(&self) -> &CodiceContestoPagamento {
        &self.codice_contesto_pagamento
    }

    pub fn importo_singolo_versamento(&self) -> Importo {
        self.importo_singolo_versamento
    }
}

/// Outcome of a successful payment activation. Carries no session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsActivationResponse {
    importo_singolo_versamento: Importo,
    iban_accredito: Iban,
    causale_versamento: String,
    ente_beneficiario: Beneficiary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    spezzoni_causale_versamento: Option<Vec<String>>,
}

impl PaymentsActivationResponse {
    pub fn importo_singolo_versamento(&self) -> Importo {
        self.importo_singolo_versamento
    }

    pub fn iban_accredito(&self) -> &Iban {
        &self.iban_accredito
    }

    pub fn causale_versamento(&self) -> &str {
        &self.causale_versamento
    }

    pub fn ente_beneficiario(&self) -> &Beneficiary {
        &self.ente_beneficiario
    }

    pub fn spezzoni_causale_versamento(&self) -> Option<&[String]> {
        self.spezzoni_causale_versamento.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status update pushed by the node once a payment instance exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentsStatusUpdateRequest {
    codice_contesto_pagamento: CodiceContestoPagamento,
    id_pagamento: IdPagamento,
}

impl PaymentsStatusUpdateRequest {
    pub fn new(codice_contesto_pagamento: CodiceContestoPagamento, id_pagamento: IdPagamento) -> Self {
        Self {
            codice_contesto_pagamento,
            id_pagamento,
        }
    }

    pub fn codice_contesto_pagamento(&self) -> &CodiceContestoPagamento {
        &self.codice_contesto_pagamento
    }

    pub fn id_pagamento(&self) -> &IdPagamento {
        &self.id_pagamento
    }
}
