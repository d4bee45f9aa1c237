//! Stable anonymous client identifier.
//!
//! Profiles and merchant businesses are keyed by this id until real
//! accounts exist. It is generated once and kept in durable storage.

use uuid::Uuid;

use crate::storage::SharedStorage;

/// Durable storage key for the client id.
pub const CLIENT_ID_KEY: &str = "vant-client-id";

/// Generates and remembers the client id.
#[derive(Clone)]
pub struct ClientIdStore {
    storage: SharedStorage,
}

impl ClientIdStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// The stored client id, creating one on first use.
    ///
    /// Returns an empty string when durable storage is unavailable, so the
    /// result is deterministic instead of a fresh id on every call.
    #[must_use]
    pub fn get_or_create(&self) -> String {
        match self.storage.get(CLIENT_ID_KEY) {
            Ok(Some(id)) if !id.trim().is_empty() => id,
            Ok(_) => {
                let id = Uuid::new_v4().to_string();
                match self.storage.set(CLIENT_ID_KEY, &id) {
                    Ok(()) => {
                        tracing::info!(client_id = %id, "Generated new client id");
                        id
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Could not persist client id");
                        String::new()
                    }
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "No durable storage for client id");
                String::new()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{FileStorage, MemoryStorage, Storage, UnavailableStorage};

    #[test]
    fn test_same_id_on_every_call() {
        let store = ClientIdStore::new(Arc::new(MemoryStorage::new()));
        let first = store.get_or_create();
        assert!(!first.is_empty());
        assert!(Uuid::parse_str(&first).is_ok());
        assert_eq!(store.get_or_create(), first);
    }

    #[test]
    fn test_id_survives_reopening_storage() {
        let path = crate::storage::tests::temp_storage_path();
        let first = ClientIdStore::new(Arc::new(FileStorage::at(path.clone()))).get_or_create();
        let second = ClientIdStore::new(Arc::new(FileStorage::at(path))).get_or_create();
        assert_eq!(first, second);
    }

    #[test]
    fn test_existing_id_is_kept() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(CLIENT_ID_KEY, "guest-123").unwrap();
        assert_eq!(ClientIdStore::new(storage).get_or_create(), "guest-123");
    }

    #[test]
    fn test_unavailable_storage_yields_empty_id() {
        let store = ClientIdStore::new(Arc::new(UnavailableStorage));
        assert_eq!(store.get_or_create(), "");
        assert_eq!(store.get_or_create(), "");
    }
}
