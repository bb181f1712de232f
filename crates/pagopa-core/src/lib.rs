//! # pagopa-core: Foundational Types for the pagoPA Proxy
//!
//! This crate defines the type-system primitives shared by the node
//! converters (`pagopa-nodo`) and the HTTP controllers (`pagopa-api`).
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for payment primitives.** `Iban`, `FiscalCode`,
//!    `Iuv`, `Importo`, `CodiceContestoPagamento`, `IdPagamento` are all
//!    newtypes with validating constructors. `Deserialize` routes through the
//!    same constructors, so an invalid value can never be decoded.
//!
//! 2. **All-or-nothing records.** Composite records in [`payments`] are built
//!    from validated primitives only. Decoding either yields a fully
//!    validated record or an error; fields are private and read-only.
//!
//! 3. **Closed error taxonomy.** [`ControllerError`] has exactly three
//!    classifications. Callers branch on the classification, not on the
//!    mere presence of a failure.
//!
//! 4. **Explicit configuration.** The four node identifiers live in
//!    [`PagoPaConfig`], passed by reference into every converter call.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pagopa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code, no I/O, no logging.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod error;
pub mod notification;
pub mod payments;
pub mod token;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use config::{ConfigError, PagoPaConfig};
pub use error::{ControllerError, ValidationError};
pub use notification::{NotificationSubscriptionRequest, NotificationSubscriptionRequestType};
pub use payments::{
    Beneficiary, BeneficiaryDetails, CheckBeneficiary, PaymentsActivationRequest,
    PaymentsActivationResponse, PaymentsCheckRequest, PaymentsCheckResponse,
    PaymentsStatusUpdateRequest,
};
pub use token::generate_codice_contesto_pagamento;
pub use types::{
    AuxDigit, CodiceContestoPagamento, CodiceIdRpt, FiscalCode, IdPagamento, Iban, Importo, Iuv,
    StationCode,
};
