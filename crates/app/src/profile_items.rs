//! Products and services a merchant lists for their business.
//!
//! Kept in durable storage under one key per business slug until the API
//! grows support for them.

use chrono::Utc;
use uuid::Uuid;
use vant_core::{BusinessSlug, NewProfileItem, ProfileItem, ProfileItemUpdate};

use crate::storage::{SharedStorage, StorageError, read_json, write_json};

/// Prefix of the per-business storage key.
pub const PROFILE_ITEMS_PREFIX: &str = "vant-profile-items-";

/// Storage key for a business slug.
#[must_use]
pub fn storage_key(slug: &str) -> String {
    format!("{PROFILE_ITEMS_PREFIX}{}", BusinessSlug::normalize(slug))
}

/// Per-business list of products and services.
#[derive(Clone)]
pub struct ProfileItemStore {
    storage: SharedStorage,
}

impl ProfileItemStore {
    #[must_use]
    pub fn new(storage: SharedStorage) -> Self {
        Self { storage }
    }

    /// Items listed for `slug`, oldest first. Unreadable data reads as empty.
    #[must_use]
    pub fn list(&self, slug: &str) -> Vec<ProfileItem> {
        read_json(self.storage.as_ref(), &storage_key(slug)).unwrap_or_default()
    }

    /// Append a new item with a generated id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub fn add(&self, slug: &str, item: NewProfileItem) -> Result<ProfileItem, StorageError> {
        let mut items = self.list(slug);
        let created = ProfileItem {
            id: Uuid::new_v4().to_string(),
            name: item.name,
            description: item.description,
            kind: item.kind,
            price: item.price,
            image_url: item.image_url,
            created_at: Utc::now(),
        };
        items.push(created.clone());
        self.save(slug, &items)?;
        tracing::debug!(slug, id = %created.id, "Listed profile item");
        Ok(created)
    }

    /// Update an item in place. `Ok(None)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub fn update(
        &self,
        slug: &str,
        id: &str,
        update: ProfileItemUpdate,
    ) -> Result<Option<ProfileItem>, StorageError> {
        let mut items = self.list(slug);
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return Ok(None);
        };
        update.apply(item);
        let updated = item.clone();
        self.save(slug, &items)?;
        Ok(Some(updated))
    }

    /// Remove an item. `Ok(false)` if the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub fn remove(&self, slug: &str, id: &str) -> Result<bool, StorageError> {
        let mut items = self.list(slug);
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.save(slug, &items)?;
        Ok(true)
    }

    fn save(&self, slug: &str, items: &[ProfileItem]) -> Result<(), StorageError> {
        write_json(self.storage.as_ref(), &storage_key(slug), &items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use vant_core::ProfileItemKind;

    use super::*;
    use crate::storage::{MemoryStorage, Storage, UnavailableStorage};

    fn mug() -> NewProfileItem {
        NewProfileItem {
            name: "Mug".to_string(),
            description: Some("Hand-thrown stoneware".to_string()),
            kind: ProfileItemKind::Product,
            price: Some("$24".to_string()),
            image_url: Some("https://cdn.example.com/mug.jpg".to_string()),
        }
    }

    #[test]
    fn test_add_then_list_then_remove() {
        let store = ProfileItemStore::new(Arc::new(MemoryStorage::new()));
        let before = Utc::now();
        let added = store.add("acme", mug()).unwrap();

        let items = store.list("acme");
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item, &added);
        assert_eq!(item.name, "Mug");
        assert_eq!(item.description.as_deref(), Some("Hand-thrown stoneware"));
        assert_eq!(item.price.as_deref(), Some("$24"));
        assert_eq!(item.image_url.as_deref(), Some("https://cdn.example.com/mug.jpg"));
        assert!(Uuid::parse_str(&item.id).is_ok());
        assert!(item.created_at >= before);

        assert!(store.remove("acme", &added.id).unwrap());
        assert!(store.list("acme").is_empty());
        assert!(!store.remove("acme", &added.id).unwrap());
    }

    #[test]
    fn test_lists_are_per_business() {
        let store = ProfileItemStore::new(Arc::new(MemoryStorage::new()));
        store.add("acme", mug()).unwrap();
        assert!(store.list("other").is_empty());
        assert_eq!(store.list("ACME").len(), 1);
    }

    #[test]
    fn test_update() {
        let store = ProfileItemStore::new(Arc::new(MemoryStorage::new()));
        let added = store.add("acme", mug()).unwrap();
        let updated = store
            .update(
                "acme",
                &added.id,
                ProfileItemUpdate {
                    kind: Some(ProfileItemKind::Service),
                    ..ProfileItemUpdate::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(updated.kind, ProfileItemKind::Service);
        assert_eq!(store.list("acme")[0].kind, ProfileItemKind::Service);
        assert_eq!(
            store.update("acme", "missing", ProfileItemUpdate::default()).unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_list_reads_as_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(&storage_key("acme"), "{\"not\":\"a list\"}").unwrap();
        let store = ProfileItemStore::new(storage);
        assert!(store.list("acme").is_empty());
        store.add("acme", mug()).unwrap();
        assert_eq!(store.list("acme").len(), 1);
    }

    #[test]
    fn test_add_without_storage_fails() {
        let store = ProfileItemStore::new(Arc::new(UnavailableStorage));
        assert!(store.list("acme").is_empty());
        assert!(store.add("acme", mug()).is_err());
    }
}
