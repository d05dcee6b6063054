//! Per-cart serialization

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per cart email.
///
/// Holding the guard serializes locate/update/recompute sequences on the same
/// cart inside this process. Carts of different customers never contend.
#[derive(Clone, Default)]
pub struct CartLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the cart of `email`
    pub async fn lock(&self, email: &str) -> OwnedMutexGuard<()> {
        let mutex = self
            .inner
            .entry(email.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// Drop mutexes nobody holds or waits on
    pub fn prune(&self) -> usize {
        let before = self.inner.len();
        self.inner.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        before - self.inner.len()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
