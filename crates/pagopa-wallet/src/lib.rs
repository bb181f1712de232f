//! # pagopa-wallet -- Payment manager interface for the pagoPA proxy
//!
//! Citizen-facing operations that do not go through the node: opening a
//! session (identified or anonymous), listing stored payment methods, and
//! reading the transaction history.
//!
//! [`types`] holds the records the proxy serves as-is. The payment manager
//! itself sits behind the [`WalletAdapter`] trait; [`MockWalletAdapter`]
//! answers deterministically for development and tests.

pub mod adapter;
pub mod error;
pub mod types;

pub use adapter::{MockWalletAdapter, WalletAdapter};
pub use error::WalletError;
pub use types::{
    CreditCard, Page, Session, SessionToken, Transaction, TransactionStatus, UserToken, Wallet,
    WalletType,
};
