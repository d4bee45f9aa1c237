//! Application context: constructs and wires every client-side service.

use std::sync::Arc;

use crate::account_mode::AccountModeStore;
use crate::api::{AccessError, ApiClient, ApiConfig};
use crate::client_id::ClientIdStore;
use crate::config::AppConfig;
use crate::demo_mode::DemoModeStore;
use crate::profile_items::ProfileItemStore;
use crate::storage::{FileStorage, MemoryStorage, SharedStorage};
use crate::views::{MerchantDashboard, ProfileView, Workspace};

/// Shared client services.
///
/// Cheaply cloneable; every store inside is reference-counted, so clones
/// observe the same state.
#[derive(Clone)]
pub struct AppContext {
    pub account: AccountModeStore,
    pub demo: DemoModeStore,
    pub client_id: ClientIdStore,
    pub items: ProfileItemStore,
    pub api: ApiClient,
}

impl AppContext {
    /// Wire the services over the given durable and session storage.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(api: ApiConfig, durable: SharedStorage, session: SharedStorage) -> Result<Self, AccessError> {
        let account = AccountModeStore::load(Arc::clone(&durable));
        let demo = DemoModeStore::load(session);
        let client_id = ClientIdStore::new(Arc::clone(&durable));
        let items = ProfileItemStore::new(durable);
        let api = ApiClient::new(api, demo.clone(), client_id.clone())?;

        tracing::debug!(has_backend = api.has_backend(), "App context ready");

        Ok(Self {
            account,
            demo,
            client_id,
            items,
            api,
        })
    }

    /// Context with file-backed durable storage in the configured state
    /// directory and in-memory session storage.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(config: &AppConfig) -> Result<Self, AccessError> {
        let durable: SharedStorage = Arc::new(FileStorage::in_dir(&config.state_dir));
        let session: SharedStorage = Arc::new(MemoryStorage::new());
        Self::new(config.api.clone(), durable, session)
    }

    /// Workspace controller starting at `path`.
    #[must_use]
    pub fn workspace(&self, path: &str) -> Workspace {
        Workspace::new(self.api.clone(), self.items.clone(), path)
    }

    #[must_use]
    pub fn profile_view(&self) -> ProfileView {
        ProfileView::new(self.api.clone(), self.account.clone(), self.demo.clone())
    }

    /// Merchant dashboard for the business with `slug`.
    #[must_use]
    pub fn merchant_dashboard(&self, slug: &str) -> MerchantDashboard {
        MerchantDashboard::new(self.api.clone(), self.items.clone(), slug)
    }
}
