//! Session token generator.
//!
//! Every check/activation flow is correlated on the node side by a
//! `codiceContestoPagamento` minted here. Tokens are version-1 UUIDs
//! (timestamp + clock sequence + node id) rendered without hyphens, so they
//! fit the node's 35-character limit.

use std::sync::LazyLock;

use rand_core::{OsRng, RngCore};
use uuid::{ContextV1, Timestamp, Uuid};

use crate::error::ControllerError;
use crate::types::CodiceContestoPagamento;

/// Per-process clock sequence, seeded randomly.
static CLOCK_SEQUENCE: LazyLock<ContextV1> =
    LazyLock::new(|| ContextV1::new(OsRng.next_u32() as u16));

/// Random node id with the multicast bit set, so it can never collide with
/// a real MAC address.
static NODE_ID: LazyLock<[u8; 6]> = LazyLock::new(|| {
    let mut node = [0u8; 6];
    OsRng.fill_bytes(&mut node);
    node[0] |= 0x01;
    node
});

/// Mint a fresh session context token.
///
/// The generated value is decoded through [`CodiceContestoPagamento::new`]
/// before being returned.
///
/// # Errors
///
/// Returns [`ControllerError::ErrorInternal`] if the generated value fails
/// the token's own validation, which means the generator is broken.
pub fn generate_codice_contesto_pagamento() -> Result<CodiceContestoPagamento, ControllerError> {
    let uuid = Uuid::new_v1(Timestamp::now(&*CLOCK_SEQUENCE), &NODE_ID);
    CodiceContestoPagamento::new(uuid.simple().to_string())
        .map_err(|_| ControllerError::ErrorInternal)
}
