//! # pagopa-nodo -- Translation layer for the pagoPA node RPC contract
//!
//! Maps the proxy's controller-facing records (`pagopa-core`) to and from
//! the node's native message shapes:
//! - **nodoVerificaRPT**: payment check
//! - **nodoAttivaRPT**: payment activation
//! - **cdInfoWisp**: status push from the node
//!
//! ## Architecture
//!
//! [`wire`] holds the node message shapes with their field names verbatim.
//! [`convert`] holds the pure converter functions; they never perform I/O
//! and report failures as a [`ControllerError`](pagopa_core::ControllerError)
//! classification. The network call itself sits behind the [`NodoAdapter`]
//! trait so controllers can run against [`MockNodoAdapter`] in tests.

pub mod adapter;
pub mod convert;
pub mod error;
pub mod wire;

pub use adapter::{MockNodoAdapter, NodoAdapter};
pub use convert::{
    cd_info_wisp_to_status_update, nodo_attiva_output_to_activation_response,
    nodo_verifica_output_to_check_response, payments_activation_request_to_nodo,
    payments_check_request_to_nodo,
};
pub use error::NodoError;
