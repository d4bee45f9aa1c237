//! Merchant dashboard: brand editing and the product/service list for one
//! business.
//!
//! The dashboard can be switched between businesses while a brand fetch is
//! still in flight, so brand loads go through a [`Latest`] slot.

use std::future::Future;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tracing::instrument;
use vant_core::{BrandInfo, NewProfileItem, ProfileItem, ProfileItemKind, mount_path, slug_to_display_name};

use crate::api::{AccessError, ApiClient};
use crate::latest::Latest;
use crate::profile_items::ProfileItemStore;
use crate::storage::StorageError;

/// Errors from the add-item form.
#[derive(Debug, Error)]
pub enum ItemError {
    /// A required field is blank.
    #[error("{0}")]
    Invalid(&'static str),

    #[error("Could not add. Try again.")]
    Storage(#[from] StorageError),
}

/// Raw add-item form fields.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    pub name: String,
    pub description: String,
    pub kind: ProfileItemKind,
    pub price: String,
    /// Photo URL (or data URL) for the Vibe Scroll card.
    pub image_url: String,
}

impl ItemForm {
    fn validate(self) -> Result<NewProfileItem, ItemError> {
        let name = required(&self.name, "Please add a name.")?;
        let image_url = required(&self.image_url, "Please add a photo for the vibe scroll.")?;
        let description = required(&self.description, "Please add a description.")?;
        let price = required(&self.price, "Please add a price.")?;

        Ok(NewProfileItem {
            name,
            description: Some(description),
            kind: self.kind,
            price: Some(price),
            image_url: Some(image_url),
        })
    }
}

fn required(value: &str, message: &'static str) -> Result<String, ItemError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ItemError::Invalid(message));
    }
    Ok(value.to_string())
}

/// Dashboard controller.
pub struct MerchantDashboard {
    api: ApiClient,
    items: ProfileItemStore,
    slug: Mutex<String>,
    brand: Latest<BrandInfo>,
}

impl MerchantDashboard {
    #[must_use]
    pub fn new(api: ApiClient, items: ProfileItemStore, slug: &str) -> Self {
        Self {
            api,
            items,
            slug: Mutex::new(slug.to_string()),
            brand: Latest::new(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> String {
        self.slug.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Show a different business. In-flight brand loads for the previous one
    /// are discarded when they complete.
    pub fn switch_to(&self, slug: &str) {
        let mut current = self.slug.lock().unwrap_or_else(PoisonError::into_inner);
        slug.clone_into(&mut current);
        drop(current);
        self.brand.begin();
    }

    /// Display name derived from the slug.
    #[must_use]
    pub fn business_name(&self) -> String {
        slug_to_display_name(&self.slug())
    }

    /// Shopper-facing link to this business's workspace page.
    #[must_use]
    pub fn mount_url(&self) -> String {
        let origin = self.api.config().origin.as_str().trim_end_matches('/');
        format!("{origin}{}", mount_path(&self.business_name()))
    }

    // =========================================================================
    // Brand
    // =========================================================================

    /// Fetch the brand for the current business.
    ///
    /// The business is captured when this is called, not when the future is
    /// first polled. Resolves to `None` if a newer load or a switch started
    /// in the meantime.
    pub fn load_brand(&self) -> impl Future<Output = Option<BrandInfo>> + '_ {
        let ticket = self.brand.begin();
        let business_name = self.business_name();
        async move {
            let brand = self.api.merchant_brand(&business_name).await;
            self.brand.commit(ticket, brand.clone()).then_some(brand)
        }
    }

    /// Last loaded or saved brand.
    #[must_use]
    pub fn brand(&self) -> Option<BrandInfo> {
        self.brand.get()
    }

    /// Save the brand form.
    ///
    /// # Errors
    ///
    /// Returns `AccessError`; show `user_message()` next to the save button.
    #[instrument(skip(self, brand))]
    pub async fn save_brand(&self, brand: BrandInfo) -> Result<BrandInfo, AccessError> {
        let saved = self.api.update_brand(&self.business_name(), &brand).await?;
        // Only a successful save supersedes loads still in flight.
        let ticket = self.brand.begin();
        self.brand.commit(ticket, saved.clone());
        Ok(saved)
    }

    // =========================================================================
    // Products & services
    // =========================================================================

    #[must_use]
    pub fn items(&self) -> Vec<ProfileItem> {
        self.items.list(&self.slug())
    }

    /// Validate the form and list the item.
    ///
    /// # Errors
    ///
    /// Returns `ItemError::Invalid` naming the first missing field (name,
    /// photo, description, price), or `ItemError::Storage` if saving fails.
    pub fn add_item(&self, form: ItemForm) -> Result<ProfileItem, ItemError> {
        let item = form.validate()?;
        let slug = self.slug();
        let created = self.items.add(&slug, item).inspect_err(|e| {
            tracing::warn!(slug = %slug, error = %e, "Could not save profile item");
        })?;
        Ok(created)
    }

    /// Remove an item. `Ok(false)` if it was not listed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be written.
    pub fn remove_item(&self, id: &str) -> Result<bool, StorageError> {
        self.items.remove(&self.slug(), id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use url::Url;

    use super::*;
    use crate::api::ApiConfig;
    use crate::api::tests::{ORIGIN, client, fake_backend, spawn};
    use crate::storage::{MemoryStorage, UnavailableStorage};

    fn dashboard(config: ApiConfig, slug: &str) -> MerchantDashboard {
        let (api, _demo) = client(config);
        MerchantDashboard::new(api, ProfileItemStore::new(Arc::new(MemoryStorage::new())), slug)
    }

    fn offline(slug: &str) -> MerchantDashboard {
        dashboard(ApiConfig::same_origin(Url::parse(ORIGIN).unwrap()), slug)
    }

    fn complete_form() -> ItemForm {
        ItemForm {
            name: " Linen Shirt ".to_string(),
            description: "Breathable summer shirt".to_string(),
            kind: ProfileItemKind::Product,
            price: "$65".to_string(),
            image_url: "https://cdn.example.com/shirt.jpg".to_string(),
        }
    }

    #[test]
    fn test_names_and_links() {
        let dash = offline("acme-goods");
        assert_eq!(dash.business_name(), "Acme Goods");
        assert_eq!(dash.mount_url(), "http://app.vant.test/mount/Acme%20Goods");
    }

    #[test]
    fn test_add_item_validation_order() {
        let dash = offline("acme");
        let cases = [
            (ItemForm::default(), "Please add a name."),
            (
                ItemForm {
                    name: "Shirt".to_string(),
                    ..ItemForm::default()
                },
                "Please add a photo for the vibe scroll.",
            ),
            (
                ItemForm {
                    name: "Shirt".to_string(),
                    image_url: "https://cdn.example.com/a.jpg".to_string(),
                    ..ItemForm::default()
                },
                "Please add a description.",
            ),
            (
                ItemForm {
                    price: "  ".to_string(),
                    ..complete_form()
                },
                "Please add a price.",
            ),
        ];
        for (form, expected) in cases {
            let err = dash.add_item(form).unwrap_err();
            assert_eq!(err.to_string(), expected);
        }
        assert!(dash.items().is_empty());
    }

    #[test]
    fn test_add_and_remove_item() {
        let dash = offline("acme");
        let item = dash.add_item(complete_form()).unwrap();
        assert_eq!(item.name, "Linen Shirt");
        assert_eq!(dash.items(), vec![item.clone()]);

        assert!(dash.remove_item(&item.id).unwrap());
        assert!(!dash.remove_item(&item.id).unwrap());
        assert!(dash.items().is_empty());
    }

    #[test]
    fn test_add_item_storage_failure() {
        let (api, _demo) = client(ApiConfig::same_origin(Url::parse(ORIGIN).unwrap()));
        let dash = MerchantDashboard::new(api, ProfileItemStore::new(Arc::new(UnavailableStorage)), "acme");
        let err = dash.add_item(complete_form()).unwrap_err();
        assert_eq!(err.to_string(), "Could not add. Try again.");
    }

    #[tokio::test]
    async fn test_offline_brand_is_empty_and_read_only() {
        let dash = offline("acme");
        assert_eq!(dash.load_brand().await, Some(BrandInfo::default()));
        let err = dash.save_brand(BrandInfo::from_form("Hi", "", "")).await.unwrap_err();
        assert!(matches!(err, AccessError::BackendUnavailable(_)));
    }

    #[tokio::test]
    async fn test_switch_discards_stale_brand() {
        let base = spawn(fake_backend()).await;
        let dash = dashboard(ApiConfig::new(base, Url::parse(ORIGIN).unwrap()), "slow-shop");

        let slow = dash.load_brand();
        dash.switch_to("acme");
        let fast = dash.load_brand();
        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow, None);
        assert_eq!(fast.unwrap().welcome_message.as_deref(), Some("Welcome to Acme"));
        assert_eq!(
            dash.brand().unwrap().welcome_message.as_deref(),
            Some("Welcome to Acme")
        );
    }

    #[tokio::test]
    async fn test_save_brand_updates_current() {
        let base = spawn(fake_backend()).await;
        let dash = dashboard(ApiConfig::new(base, Url::parse(ORIGIN).unwrap()), "acme");
        let saved = dash
            .save_brand(BrandInfo::from_form("Hello there", " Slow fashion ", ""))
            .await
            .unwrap();
        assert_eq!(saved.ethos.as_deref(), Some("Slow fashion"));
        assert_eq!(dash.brand(), Some(saved));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_pending_load() {
        let base = spawn(fake_backend()).await;
        let dash = dashboard(ApiConfig::new(base, Url::parse(ORIGIN).unwrap()), "locked");

        let load = dash.load_brand();
        let err = dash.save_brand(BrandInfo::from_form("Hi", "", "")).await.unwrap_err();
        assert!(matches!(err, AccessError::Upstream { status: 403, .. }));

        let loaded = load.await.unwrap();
        assert_eq!(loaded.welcome_message.as_deref(), Some("Welcome to Locked"));
        assert_eq!(dash.brand(), Some(loaded));
    }
}
