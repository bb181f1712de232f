//! # Payment Manager Adapter Interface
//!
//! The `WalletAdapter` trait abstracts over the pagoPA payment manager,
//! which owns citizen sessions, stored payment methods and the transaction
//! history. Production deployments implement it against the live REST API;
//! development and tests use [`MockWalletAdapter`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::WalletError;
use crate::types::{
    CreditCard, Page, Session, SessionToken, Transaction, TransactionStatus, UserToken, Wallet,
    WalletType,
};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Adapter trait for the payment manager.
///
/// Implementations must be `Send + Sync` so they can be shared across
/// async tasks behind an `Arc`. The trait is object-safe to support
/// runtime adapter selection (mock vs. live).
pub trait WalletAdapter: Send + Sync {
    /// Open a session for an identified citizen.
    fn login(&self, user: &UserToken) -> Result<Session, WalletError>;

    /// Open an anonymous session.
    fn login_anonymous(&self) -> Result<Session, WalletError>;

    /// Stored payment methods of the session's citizen.
    fn wallets(&self, session: &SessionToken) -> Result<Vec<Wallet>, WalletError>;

    /// Transaction history, newest first, restricted to `page`.
    fn transactions(
        &self,
        session: &SessionToken,
        page: Page,
    ) -> Result<Vec<Transaction>, WalletError>;

    /// A single transaction of the session's citizen.
    fn transaction(&self, session: &SessionToken, id: u64) -> Result<Transaction, WalletError>;

    /// Return the human-readable name of this adapter implementation.
    fn adapter_name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Mock adapter
// ---------------------------------------------------------------------------

/// Mock payment manager for testing and development.
///
/// Sessions are self-describing, so the mock keeps no state:
/// - user tokens ending in "0000" are refused as invalid credentials
/// - user tokens ending in "9999" fail with [`WalletError::ServiceUnavailable`]
/// - other user tokens open a citizen session owning two wallets and
///   three transactions
/// - anonymous sessions own nothing
/// - session tokens this mock did not issue are invalid
#[derive(Debug, Clone, Default)]
pub struct MockWalletAdapter;

enum SessionKind {
    Citizen,
    Anonymous,
}

impl MockWalletAdapter {
    const CITIZEN_PREFIX: &'static str = "MOCK-USER-";
    const ANONYMOUS_PREFIX: &'static str = "MOCK-ANON-";

    /// Id of the card wallet; the bank account wallet is `CARD_WALLET_ID + 1`.
    pub const CARD_WALLET_ID: u64 = 1001;

    fn session_kind(session: &SessionToken) -> Result<SessionKind, WalletError> {
        let token = session.as_str();
        if token.starts_with(Self::ANONYMOUS_PREFIX) {
            Ok(SessionKind::Anonymous)
        } else if token.starts_with(Self::CITIZEN_PREFIX) {
            Ok(SessionKind::Citizen)
        } else {
            Err(WalletError::InvalidSession)
        }
    }

    fn citizen_wallets() -> Vec<Wallet> {
        vec![
            Wallet {
                id_wallet: Self::CARD_WALLET_ID,
                wallet_type: WalletType::CreditCard,
                favourite: true,
                credit_card: Some(CreditCard {
                    holder: "Mario Rossi".to_string(),
                    masked_pan: "************0403".to_string(),
                    expire_month: "05".to_string(),
                    expire_year: "28".to_string(),
                    brand: "VISA".to_string(),
                }),
                iban: None,
            },
            Wallet {
                id_wallet: Self::CARD_WALLET_ID + 1,
                wallet_type: WalletType::BankAccount,
                favourite: false,
                credit_card: None,
                iban: Some("IT60X05428111010000001****".to_string()),
            },
        ]
    }

    /// Newest first.
    fn citizen_history() -> Vec<Transaction> {
        let at = |secs: i64| DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
        vec![
            Transaction {
                id: 3,
                created: at(1_718_000_000),
                amount: Decimal::new(4200, 2),
                fee: Some(Decimal::new(100, 2)),
                description: "TARI 2024 rata 2".to_string(),
                merchant: "Comune di Roma".to_string(),
                status: TransactionStatus::Pending,
                id_wallet: Self::CARD_WALLET_ID,
            },
            Transaction {
                id: 2,
                created: at(1_712_000_000),
                amount: Decimal::new(12050, 2),
                fee: Some(Decimal::new(150, 2)),
                description: "TARI 2024 rata 1".to_string(),
                merchant: "Comune di Roma".to_string(),
                status: TransactionStatus::Confirmed,
                id_wallet: Self::CARD_WALLET_ID,
            },
            Transaction {
                id: 1,
                created: at(1_700_000_000),
                amount: Decimal::new(3000, 2),
                fee: None,
                description: "Bollo auto".to_string(),
                merchant: "ACI".to_string(),
                status: TransactionStatus::Refused,
                id_wallet: Self::CARD_WALLET_ID + 1,
            },
        ]
    }
}

impl WalletAdapter for MockWalletAdapter {
    fn login(&self, user: &UserToken) -> Result<Session, WalletError> {
        let raw = user.as_str();
        if raw.ends_with("0000") {
            return Err(WalletError::InvalidCredentials);
        }
        if raw.ends_with("9999") {
            return Err(WalletError::ServiceUnavailable {
                reason: "mock: user token ends in 9999".to_string(),
            });
        }
        Ok(Session {
            token: SessionToken::new(format!("{}{raw}", Self::CITIZEN_PREFIX))?,
            anonymous: false,
        })
    }

    fn login_anonymous(&self) -> Result<Session, WalletError> {
        let id = Uuid::new_v4().simple();
        Ok(Session {
            token: SessionToken::new(format!("{}{id}", Self::ANONYMOUS_PREFIX))?,
            anonymous: true,
        })
    }

    fn wallets(&self, session: &SessionToken) -> Result<Vec<Wallet>, WalletError> {
        match Self::session_kind(session)? {
            SessionKind::Citizen => Ok(Self::citizen_wallets()),
            SessionKind::Anonymous => Ok(Vec::new()),
        }
    }

    fn transactions(
        &self,
        session: &SessionToken,
        page: Page,
    ) -> Result<Vec<Transaction>, WalletError> {
        match Self::session_kind(session)? {
            SessionKind::Citizen => Ok(page.slice(&Self::citizen_history())),
            SessionKind::Anonymous => Ok(Vec::new()),
        }
    }

    fn transaction(&self, session: &SessionToken, id: u64) -> Result<Transaction, WalletError> {
        let history = match Self::session_kind(session)? {
            SessionKind::Citizen => Self::citizen_history(),
            SessionKind::Anonymous => Vec::new(),
        };
        history
            .into_iter()
            .find(|t| t.id == id)
            .ok_or(WalletError::TransactionNotFound { id })
    }

    fn adapter_name(&self) -> &str {
        "MockWalletAdapter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn citizen_session() -> SessionToken {
        MockWalletAdapter
            .login(&UserToken::new("citizen-42").unwrap())
            .unwrap()
            .token
    }

    #[test]
    fn adapter_is_object_safe() {
        let shared: Arc<dyn WalletAdapter> = Arc::new(MockWalletAdapter);
        assert_eq!(shared.adapter_name(), "MockWalletAdapter");
    }

    #[test]
    fn login_opens_citizen_session() {
        let session = MockWalletAdapter
            .login(&UserToken::new("citizen-42").unwrap())
            .unwrap();
        assert!(!session.anonymous);
        assert_eq!(MockWalletAdapter.wallets(&session.token).unwrap().len(), 2);
    }

    #[test]
    fn login_conventions() {
        let refused = MockWalletAdapter.login(&UserToken::new("user0000").unwrap());
        assert!(matches!(refused, Err(WalletError::InvalidCredentials)));

        let down = MockWalletAdapter.login(&UserToken::new("user9999").unwrap());
        assert!(matches!(down, Err(WalletError::ServiceUnavailable { .. })));
    }

    #[test]
    fn anonymous_sessions_are_distinct_and_empty() {
        let a = MockWalletAdapter.login_anonymous().unwrap();
        let b = MockWalletAdapter.login_anonymous().unwrap();
        assert!(a.anonymous);
        assert_ne!(a.token, b.token);
        assert!(MockWalletAdapter.wallets(&a.token).unwrap().is_empty());
        assert!(MockWalletAdapter
            .transactions(&a.token, Page::default())
            .unwrap()
            .is_empty());
        assert!(matches!(
            MockWalletAdapter.transaction(&a.token, 1),
            Err(WalletError::TransactionNotFound { id: 1 })
        ));
    }

    #[test]
    fn foreign_session_is_invalid() {
        let session = SessionToken::new("issued-elsewhere").unwrap();
        assert!(matches!(
            MockWalletAdapter.wallets(&session),
            Err(WalletError::InvalidSession)
        ));
    }

    #[test]
    fn history_is_newest_first_and_paged() {
        let session = citizen_session();
        let all = MockWalletAdapter
            .transactions(&session, Page::default())
            .unwrap();
        let ids: Vec<u64> = all.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(all.windows(2).all(|w| w[0].created >= w[1].created));

        let second = MockWalletAdapter
            .transactions(&session, Page::new(Some(1), Some(1)).unwrap())
            .unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].id, 2);
    }

    #[test]
    fn single_transaction_lookup() {
        let session = citizen_session();
        let tx = MockWalletAdapter.transaction(&session, 2).unwrap();
        assert_eq!(tx.amount, Decimal::new(12050, 2));
        assert_eq!(tx.status, TransactionStatus::Confirmed);
        assert!(matches!(
            MockWalletAdapter.transaction(&session, 99),
            Err(WalletError::TransactionNotFound { id: 99 })
        ));
    }
}
