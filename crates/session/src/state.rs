//! Session state shared by the cart and order components.
//!
//! The original site kept its cart and order history as ambient
//! process-wide entries; here the store is an explicit object owned by
//! one [`Session`] and passed to every component. All read-modify-write
//! cycles on the persisted collections run under the session's single
//! store lock, so back-to-back mutations from different UI handlers can
//! no longer lose updates.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cart::CartStore;
use crate::config::SessionConfig;
use crate::notify::{Notifier, TracingNotifier};
use crate::order::OrderService;
use crate::storage::KeyValueStore;

/// Handle to one shopper's client-side state.
///
/// Cheaply cloneable via `Arc`; clones share the store, notifier, and
/// configuration.
pub struct Session<S, N = TracingNotifier> {
    inner: Arc<SessionInner<S, N>>,
}

struct SessionInner<S, N> {
    store: Mutex<S>,
    notifier: N,
    config: SessionConfig,
}

impl<S, N> Clone for Session<S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> Session<S> {
    /// Create a session with the default configuration and the
    /// tracing-backed notifier.
    pub fn with_defaults(store: S) -> Self {
        Self::new(store, TracingNotifier, SessionConfig::default())
    }
}

impl<S: KeyValueStore, N: Notifier> Session<S, N> {
    /// Create a session over an explicit store, notifier, and config.
    pub fn new(store: S, notifier: N, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                store: Mutex::new(store),
                notifier,
                config,
            }),
        }
    }

    /// Get a reference to the session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.inner.config
    }

    /// Get a reference to the UI notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }

    /// The cart component.
    #[must_use]
    pub fn cart(&self) -> CartStore<S, N> {
        CartStore::new(self.clone())
    }

    /// The order component.
    #[must_use]
    pub fn orders(&self) -> OrderService<S, N> {
        OrderService::new(self.clone())
    }

    /// Lock the store for one read-modify-write cycle.
    ///
    /// A poisoned lock is recovered rather than propagated: the store
    /// holds plain strings, so a panic mid-operation cannot leave it in
    /// a torn state worse than the last completed write.
    pub(crate) fn store(&self) -> MutexGuard<'_, S> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore as _, MemoryStore};

    #[test]
    fn test_clones_share_the_store() {
        let session = Session::with_defaults(MemoryStore::new());
        let clone = session.clone();

        session
            .store()
            .set("k", "v".to_owned())
            .expect("memory store never fails");
        assert_eq!(
            clone.store().get("k").expect("memory store never fails"),
            Some("v".to_owned())
        );
    }
}
