//! Demo-mode flag, scoped to the session.
//!
//! While active, the accessors serve canned profile and brand data for the
//! demo business instead of calling the API.

use std::sync::Arc;

use tokio::sync::watch;

use crate::storage::SharedStorage;

/// Session storage key for the demo flag. Present with `"1"` when active.
pub const DEMO_MODE_KEY: &str = "vant-demo-mode";

/// Session-scoped demo flag with change notifications.
#[derive(Clone)]
pub struct DemoModeStore {
    inner: Arc<DemoModeStoreInner>,
}

struct DemoModeStoreInner {
    storage: SharedStorage,
    tx: watch::Sender<bool>,
}

impl DemoModeStore {
    /// Create the store from session storage. Unreadable storage means inactive.
    #[must_use]
    pub fn load(storage: SharedStorage) -> Self {
        let active = matches!(storage.get(DEMO_MODE_KEY), Ok(Some(v)) if v == "1");
        let (tx, _rx) = watch::channel(active);
        Self {
            inner: Arc::new(DemoModeStoreInner { storage, tx }),
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.inner.tx.borrow()
    }

    pub fn enter_demo(&self) {
        self.set(true);
    }

    pub fn exit_demo(&self) {
        self.set(false);
    }

    /// Turn demo mode on or off, persisting the flag and notifying observers.
    pub fn set(&self, on: bool) {
        let result = if on {
            self.inner.storage.set(DEMO_MODE_KEY, "1")
        } else {
            self.inner.storage.remove(DEMO_MODE_KEY)
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, on, "Could not persist demo mode");
        }
        tracing::debug!(on, "Demo mode changed");
        self.inner.tx.send_replace(on);
    }

    /// Observe the flag.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.tx.subscribe()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage, UnavailableStorage};

    #[test]
    fn test_inactive_by_default() {
        let store = DemoModeStore::load(Arc::new(MemoryStorage::new()));
        assert!(!store.is_active());
    }

    #[test]
    fn test_enter_and_exit_update_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = DemoModeStore::load(storage.clone());

        store.enter_demo();
        assert!(store.is_active());
        assert_eq!(storage.get(DEMO_MODE_KEY).unwrap().as_deref(), Some("1"));

        store.exit_demo();
        assert!(!store.is_active());
        assert_eq!(storage.get(DEMO_MODE_KEY).unwrap(), None);
    }

    #[test]
    fn test_loads_persisted_flag() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DEMO_MODE_KEY, "1").unwrap();
        assert!(DemoModeStore::load(storage.clone()).is_active());

        storage.set(DEMO_MODE_KEY, "yes").unwrap();
        assert!(!DemoModeStore::load(storage).is_active());
    }

    #[test]
    fn test_observers_are_notified() {
        let store = DemoModeStore::load(Arc::new(MemoryStorage::new()));
        let mut rx = store.subscribe();
        store.enter_demo();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());
    }

    #[test]
    fn test_unavailable_storage_is_inactive() {
        let store = DemoModeStore::load(Arc::new(UnavailableStorage));
        assert!(!store.is_active());
        store.enter_demo();
        assert!(store.is_active());
    }
}
