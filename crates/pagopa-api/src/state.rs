//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! AppState holds:
//! - **Node client**: node identifiers plus the transport adapter. `None`
//!   when the identifiers are not configured; node-backed routes answer 503.
//! - **Payment ids**: `idPagamento` values pushed by the node, keyed by
//!   session token. Bounded; the oldest entries are evicted first.
//! - **Subscriptions**: notification subscriptions, keyed by installation id.
//! - **Wallet client**: payment manager adapter behind the user, wallet and
//!   transaction routes. `None` until attached; those routes answer 503.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;

use pagopa_core::{FiscalCode, PagoPaConfig, PaymentsStatusUpdateRequest};
use pagopa_nodo::NodoAdapter;
use pagopa_wallet::WalletAdapter;

// -- Generic In-Memory Store --------------------------------------------------

/// Thread-safe, cloneable in-memory key-value store.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not `tokio::sync`)
/// because we never hold the lock across `.await` points.
#[derive(Debug)]
pub struct Store<K, V> {
    data: Arc<RwLock<HashMap<K, V>>>,
}

impl<K, V> Clone for Store<K, V> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<K: Eq + Hash, V: Clone> Default for Store<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: Clone> Store<K, V> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.data.write().insert(key, value)
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.data.read().get(key).cloned()
    }

    /// Remove a record by key.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.data.write().remove(key)
    }

    /// Remove a record only if `keep_out` approves the current value.
    ///
    /// Check and removal run under a single write lock, so a concurrent
    /// insert cannot land between them.
    pub fn remove_if(&self, key: &K, keep_out: impl FnOnce(&V) -> bool) -> Option<V> {
        let mut guard = self.data.write();
        match guard.get(key) {
            Some(current) if keep_out(current) => guard.remove(key),
            _ => None,
        }
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

// -- Bounded Store ------------------------------------------------------------

/// In-memory store holding at most `capacity` records.
///
/// Inserting past the capacity evicts the least recently written record.
/// Rewriting an existing key counts as a fresh write.
#[derive(Debug)]
pub struct BoundedStore<K, V> {
    inner: Arc<RwLock<BoundedInner<K, V>>>,
    capacity: usize,
}

#[derive(Debug)]
struct BoundedInner<K, V> {
    data: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> Clone for BoundedStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            capacity: self.capacity,
        }
    }
}

impl<K: Eq + Hash + Clone, V: Clone> BoundedStore<K, V> {
    /// Create an empty store. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedInner {
                data: HashMap::new(),
                order: VecDeque::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    /// Insert a record, returning the previous value if the key existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.write();
        let previous = inner.data.insert(key.clone(), value);
        if previous.is_some() {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key);
        while inner.data.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.data.remove(&oldest);
        }
        previous
    }

    /// Retrieve a record by key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read().data.get(key).cloned()
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.inner.read().data.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().data.is_empty()
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// -- Records ------------------------------------------------------------------

/// An active notification subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    pub installation_id: String,
    pub fiscal_code: FiscalCode,
}

// -- Node client --------------------------------------------------------------

/// Node identifiers paired with the adapter that carries the calls.
#[derive(Clone)]
pub struct NodoClient {
    pub config: PagoPaConfig,
    pub adapter: Arc<dyn NodoAdapter>,
}

impl NodoClient {
    pub fn new(config: PagoPaConfig, adapter: Arc<dyn NodoAdapter>) -> Self {
        Self { config, adapter }
    }
}

impl std::fmt::Debug for NodoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodoClient")
            .field("config", &self.config)
            .field("adapter", &self.adapter.adapter_name())
            .finish()
    }
}

// -- Wallet client ------------------------------------------------------------

/// Payment manager adapter shared by the user, wallet and transaction routes.
#[derive(Clone)]
pub struct WalletClient {
    pub adapter: Arc<dyn WalletAdapter>,
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient")
            .field("adapter", &self.adapter.adapter_name())
            .finish()
    }
}

// -- Configuration ------------------------------------------------------------

/// Default bound on stored status-push payment ids.
pub const DEFAULT_PAYMENT_STATUS_CAPACITY: usize = 10_000;

/// Application configuration.
///
/// Custom `Debug` redacts the `auth_token` to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Static bearer token. If `None`, authentication is disabled.
    pub auth_token: Option<String>,
    /// Maximum number of status-push payment ids kept in memory.
    pub payment_status_capacity: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("payment_status_capacity", &self.payment_status_capacity)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            auth_token: None,
            payment_status_capacity: DEFAULT_PAYMENT_STATUS_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT` (default: 3000; unparsable values fall back to the default)
    /// - `AUTH_TOKEN` (optional; absent disables authentication)
    /// - `PAYMENT_STATUS_CAPACITY` (default: 10000)
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let auth_token = std::env::var("AUTH_TOKEN")
            .ok()
            .filter(|t| !t.is_empty());
        let payment_status_capacity = std::env::var("PAYMENT_STATUS_CAPACITY")
            .ok()
            .and_then(|c| c.parse().ok())
            .filter(|c| *c > 0)
            .unwrap_or(DEFAULT_PAYMENT_STATUS_CAPACITY);
        Self {
            port,
            auth_token,
            payment_status_capacity,
        }
    }
}

// -- AppState -----------------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub nodo: Option<NodoClient>,
    pub payment_ids: BoundedStore<String, PaymentsStatusUpdateRequest>,
    pub subscriptions: Store<String, SubscriptionRecord>,
    pub wallet: Option<WalletClient>,
    pub config: AppConfig,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create a new application state with default configuration and no node client.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default(), None)
    }

    /// Create a new application state with the given configuration and optional node client.
    pub fn with_config(config: AppConfig, nodo: Option<NodoClient>) -> Self {
        Self {
            nodo,
            payment_ids: BoundedStore::new(config.payment_status_capacity),
            subscriptions: Store::new(),
            wallet: None,
            config,
        }
    }

    /// Attach the payment manager adapter.
    pub fn with_wallet(mut self, adapter: Arc<dyn WalletAdapter>) -> Self {
        self.wallet = Some(WalletClient { adapter });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagopa_nodo::MockNodoAdapter;
    use pagopa_wallet::MockWalletAdapter;

    #[test]
    fn store_insert_get_remove() {
        let store: Store<String, u32> = Store::new();
        assert!(store.is_empty());
        assert_eq!(store.insert("a".into(), 1), None);
        assert_eq!(store.insert("a".into(), 2), Some(1));
        assert_eq!(store.get(&"a".to_string()), Some(2));
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove(&"a".to_string()), Some(2));
        assert!(store.get(&"a".to_string()).is_none());
    }

    #[test]
    fn store_remove_if_checks_current_value() {
        let store: Store<String, u32> = Store::new();
        store.insert("a".into(), 1);
        assert_eq!(store.remove_if(&"a".to_string(), |v| *v == 2), None);
        assert_eq!(store.get(&"a".to_string()), Some(1));
        assert_eq!(store.remove_if(&"a".to_string(), |v| *v == 1), Some(1));
        assert!(store.is_empty());
        assert_eq!(store.remove_if(&"missing".to_string(), |_| true), None);
    }

    #[test]
    fn store_remove_if_races_with_insert() {
        // A reassignment racing with a stale owner's removal must survive.
        let store: Store<String, &'static str> = Store::new();
        store.insert("device".into(), "owner-a");
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    if i % 2 == 0 {
                        store.insert("device".into(), "owner-b");
                    } else {
                        store.remove_if(&"device".to_string(), |v| *v == "owner-a");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.get(&"device".to_string()), Some("owner-b"));
    }

    #[test]
    fn store_clones_share_data() {
        let store: Store<String, u32> = Store::new();
        let clone = store.clone();
        clone.insert("k".into(), 7);
        assert_eq!(store.get(&"k".to_string()), Some(7));
    }

    #[test]
    fn bounded_store_evicts_oldest_first() {
        let store: BoundedStore<String, u32> = BoundedStore::new(2);
        store.insert("a".into(), 1);
        store.insert("b".into(), 2);
        store.insert("c".into(), 3);
        assert_eq!(store.len(), 2);
        assert!(store.get(&"a".to_string()).is_none());
        assert_eq!(store.get(&"b".to_string()), Some(2));
        assert_eq!(store.get(&"c".to_string()), Some(3));
    }

    #[test]
    fn bounded_store_rewrite_refreshes_age() {
        let store: BoundedStore<String, u32> = BoundedStore::new(2);
        store.insert("a".into(), 1);
        store.insert("b".into(), 2);
        assert_eq!(store.insert("a".into(), 10), Some(1));
        store.insert("c".into(), 3);
        assert_eq!(store.get(&"a".to_string()), Some(10));
        assert!(store.get(&"b".to_string()).is_none());
    }

    #[test]
    fn bounded_store_zero_capacity_keeps_latest() {
        let store: BoundedStore<String, u32> = BoundedStore::new(0);
        assert_eq!(store.capacity(), 1);
        store.insert("a".into(), 1);
        store.insert("b".into(), 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&"b".to_string()), Some(2));
    }

    #[test]
    fn state_uses_configured_payment_capacity() {
        let config = AppConfig {
            payment_status_capacity: 5,
            ..AppConfig::default()
        };
        let state = AppState::with_config(config, None);
        assert_eq!(state.payment_ids.capacity(), 5);
    }

    #[test]
    fn app_config_debug_redacts_token() {
        let cfg = AppConfig {
            auth_token: Some("super-secret".into()),
            ..AppConfig::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn nodo_client_debug_redacts_password() {
        let client = NodoClient::new(
            PagoPaConfig::new("PSP1", "INT1", "CH1", "TOK1"),
            Arc::new(MockNodoAdapter),
        );
        let dbg = format!("{client:?}");
        assert!(!dbg.contains("TOK1"));
        assert!(dbg.contains("MockNodoAdapter"));
    }

    #[test]
    fn new_state_has_no_nodo_client() {
        let state = AppState::new();
        assert!(state.nodo.is_none());
        assert_eq!(state.config.port, 3000);
        assert!(state.payment_ids.is_empty());
        assert!(state.wallet.is_none());
    }

    #[test]
    fn with_wallet_attaches_adapter() {
        let state = AppState::new().with_wallet(Arc::new(MockWalletAdapter));
        let dbg = format!("{:?}", state.wallet);
        assert!(dbg.contains("MockWalletAdapter"));
    }
}
