//! # Payment Manager Records
//!
//! Credentials, sessions, wallets and transactions as the proxy exposes
//! them. Credential and session tokens validate at construction and on
//! deserialization, and both redact themselves in `Debug` output.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9_-]+$").expect("pattern is a valid regex literal"));

macro_rules! secret_token {
    ($(#[$doc:meta])* $ty:ident, $max:expr, $err:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize)]
        pub struct $ty(String);

        impl $ty {
            /// Maximum accepted length.
            pub const MAX_LEN: usize = $max;

            /// # Errors
            ///
            /// Rejects empty values, values longer than [`Self::MAX_LEN`], and
            /// characters outside `[A-Za-z0-9_-]`.
            pub fn new(value: impl Into<String>) -> Result<Self, WalletError> {
                let s = value.into();
                if s.len() > Self::MAX_LEN || !TOKEN_PATTERN.is_match(&s) {
                    return Err(WalletError::$err);
                }
                Ok(Self(s))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($ty), "([REDACTED])"))
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

secret_token!(
    /// Credential a citizen presents to open a payment manager session.
    UserToken,
    128,
    InvalidCredentials
);

secret_token!(
    /// Payment manager session, returned by login and required by every
    /// wallet and transaction call.
    SessionToken,
    256,
    InvalidSession
);

/// An open payment manager session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: SessionToken,
    /// Anonymous sessions can pay notices but own no wallet or history.
    pub anonymous: bool,
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletType {
    CreditCard,
    BankAccount,
}

/// Card details with the PAN already masked by the payment manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub holder: String,
    pub masked_pan: String,
    pub expire_month: String,
    pub expire_year: String,
    pub brand: String,
}

/// A stored payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id_wallet: u64,
    #[serde(rename = "type")]
    pub wallet_type: WalletType,
    pub favourite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
    /// Masked IBAN of a bank account wallet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Refused,
}

/// A payment made through one of the citizen's wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: u64,
    pub created: DateTime<Utc>,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Decimal>,
    pub description: String,
    pub merchant: String,
    pub status: TransactionStatus,
    pub id_wallet: u64,
}

/// Window over a transaction history, newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    start: usize,
    size: usize,
}

impl Page {
    pub const DEFAULT_SIZE: usize = 20;
    pub const MAX_SIZE: usize = 100;

    /// Build a page; `size` defaults to [`Self::DEFAULT_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`WalletError::InvalidPage`] for a zero size or one above
    /// [`Self::MAX_SIZE`].
    pub fn new(start: Option<usize>, size: Option<usize>) -> Result<Self, WalletError> {
        let size = size.unwrap_or(Self::DEFAULT_SIZE);
        if size == 0 || size > Self::MAX_SIZE {
            return Err(WalletError::InvalidPage {
                reason: format!("size must be between 1 and {}, got {size}", Self::MAX_SIZE),
            });
        }
        Ok(Self {
            start: start.unwrap_or(0),
            size,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Apply the window to an already ordered history.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().skip(self.start).take(self.size).cloned().collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start: 0,
            size: Self::DEFAULT_SIZE,
        }
    }
}
