//! Application state for order-server

use crate::auth::{Accounts, CodeMailer, CodeStore, LogMailer};
use crate::cart::{CartLedger, CartLocks};
use crate::config::Config;
use crate::orders::OrderFinalizer;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Runtime configuration
    pub config: Arc<Config>,
    /// Cart mutations and reservations
    pub ledger: CartLedger,
    /// Checkout and order history
    pub orders: OrderFinalizer,
    /// Customer accounts and recovery codes
    pub accounts: Accounts,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self::with_mailer(pool, config, Arc::new(LogMailer))
    }

    pub fn with_mailer(pool: SqlitePool, config: Config, mailer: Arc<dyn CodeMailer>) -> Self {
        // Ledger and finalizer must share one lock set
        let locks = CartLocks::new();
        let codes = CodeStore::new(config.verification_code_ttl);
        Self {
            ledger: CartLedger::new(pool.clone(), locks.clone()),
            orders: OrderFinalizer::new(pool.clone(), locks),
            accounts: Accounts::new(pool.clone(), codes, mailer),
            config: Arc::new(config),
            pool,
        }
    }

    /// Drop expired recovery codes and idle cart locks
    pub fn sweep(&self) {
        let codes = self.accounts.codes().purge_expired();
        let locks = self.ledger.locks().prune();
        if codes > 0 || locks > 0 {
            tracing::debug!(codes, locks, "Sweep removed stale entries");
        }
    }
}
