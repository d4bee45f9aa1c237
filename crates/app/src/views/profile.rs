//! Profile page: businesses, account switching and demo entry.

use tracing::instrument;
use vant_core::{
    AccountModeState, DEMO_BUSINESS_NAME, DEMO_BUSINESS_SLUG, MerchantBusiness, UserProfile, mount_path,
};

use crate::account_mode::{AccountModeError, AccountModeStore};
use crate::api::{AccessError, ApiClient};
use crate::demo_mode::DemoModeStore;
use crate::latest::Latest;

/// Everything the profile page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStatus {
    pub profile: UserProfile,
    pub account: AccountModeState,
    pub demo: bool,
    /// Adding businesses needs a backend; the page explains how to run one.
    pub has_backend: bool,
}

/// Profile page controller.
pub struct ProfileView {
    api: ApiClient,
    account: AccountModeStore,
    demo: DemoModeStore,
    profile: Latest<UserProfile>,
}

impl ProfileView {
    #[must_use]
    pub fn new(api: ApiClient, account: AccountModeStore, demo: DemoModeStore) -> Self {
        Self {
            api,
            account,
            demo,
            profile: Latest::new(),
        }
    }

    /// Fetch the profile and snapshot the account state.
    pub async fn load(&self) -> ProfileStatus {
        let ticket = self.profile.begin();
        let profile = self.api.fetch_profile().await;
        self.profile.commit(ticket, profile.clone());
        self.status(profile)
    }

    /// Most recently loaded profile.
    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.profile.get()
    }

    /// Register a business and switch to merchant mode for it.
    ///
    /// Returns the confirmation to show under the form.
    ///
    /// # Errors
    ///
    /// Returns `AccessError` from the accessor; its `user_message()` is the
    /// inline error text.
    #[instrument(skip(self))]
    pub async fn add_business(&self, business_name: &str) -> Result<String, AccessError> {
        let ticket = self.profile.begin();
        let profile = self.api.add_merchant_business(business_name).await?;
        self.profile.commit(ticket, profile.clone());

        let Some(business) = profile.find_business(business_name.trim()) else {
            return Ok("Business added.".to_string());
        };
        match self.account.switch_to_merchant(business.clone()) {
            Ok(()) => Ok(format!(
                "{} added. You're now in merchant mode.",
                business.business_name
            )),
            Err(e) => {
                tracing::warn!(error = %e, "Added business is incomplete, staying in current mode");
                Ok("Business added.".to_string())
            }
        }
    }

    /// Back to the personal (shopper) account.
    pub fn switch_to_user(&self) -> String {
        self.account.switch_to_user();
        "Switched to personal account.".to_string()
    }

    /// Act as merchant for one of the profile's businesses.
    ///
    /// # Errors
    ///
    /// Returns `AccountModeError` if the business has no slug or name.
    pub fn switch_to_merchant(&self, business: MerchantBusiness) -> Result<String, AccountModeError> {
        let name = business.business_name.clone();
        self.account.switch_to_merchant(business)?;
        Ok(format!("Now using {name}."))
    }

    /// Turn demo mode on as merchant of the demo business.
    ///
    /// Returns the path to navigate to.
    pub fn enter_demo(&self) -> String {
        self.demo.enter_demo();
        let business = MerchantBusiness::new(DEMO_BUSINESS_SLUG, DEMO_BUSINESS_NAME);
        if let Err(e) = self.account.switch_to_merchant(business) {
            tracing::warn!(error = %e, "Could not switch to demo business");
        }
        tracing::info!("Entered demo mode");
        mount_path(DEMO_BUSINESS_NAME)
    }

    /// Turn demo mode off and return to the personal account.
    ///
    /// Returns the path to navigate to.
    pub fn exit_demo(&self) -> String {
        self.demo.exit_demo();
        self.account.switch_to_user();
        tracing::info!("Exited demo mode");
        "/".to_string()
    }

    fn status(&self, profile: UserProfile) -> ProfileStatus {
        ProfileStatus {
            profile,
            account: self.account.state(),
            demo: self.demo.is_active(),
            has_backend: self.api.has_backend(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use url::Url;
    use vant_core::AccountMode;

    use super::*;
    use crate::api::ApiConfig;
    use crate::api::tests::{ORIGIN, client, fake_backend, spawn};
    use crate::storage::MemoryStorage;

    fn view(config: ApiConfig) -> ProfileView {
        let (api, demo) = client(config);
        let account = AccountModeStore::load(Arc::new(MemoryStorage::new()));
        ProfileView::new(api, account, demo)
    }

    fn offline() -> ProfileView {
        view(ApiConfig::same_origin(Url::parse(ORIGIN).unwrap()))
    }

    #[tokio::test]
    async fn test_demo_round_trip() {
        let view = offline();
        assert_eq!(view.enter_demo(), "/mount/Vant%20Demo%20Business");

        let status = view.load().await;
        assert!(status.demo);
        assert_eq!(status.account.mode(), AccountMode::Merchant);
        assert_eq!(
            status.account.current_business().map(|b| b.slug.as_str()),
            Some(DEMO_BUSINESS_SLUG)
        );
        assert_eq!(status.profile.businesses.len(), 1);

        assert_eq!(view.exit_demo(), "/");
        let status = view.load().await;
        assert!(!status.demo);
        assert_eq!(status.account, AccountModeState::user());
        assert!(status.profile.businesses.is_empty());
    }

    #[tokio::test]
    async fn test_add_business_without_backend_explains_setup() {
        let view = offline();
        assert!(!view.load().await.has_backend);
        let err = view.add_business("Acme").await.unwrap_err();
        assert!(err.user_message().contains("VANT_API_BASE_URL"));
        assert!(!view.account.is_merchant());
    }

    #[tokio::test]
    async fn test_add_business_switches_to_merchant() {
        let base = spawn(fake_backend()).await;
        let view = view(ApiConfig::new(base, Url::parse(ORIGIN).unwrap()));

        let message = view.add_business("Acme Goods").await.unwrap();
        assert_eq!(message, "Acme Goods added. You're now in merchant mode.");
        assert_eq!(
            view.account.current_business(),
            Some(MerchantBusiness::new("acme-goods", "Acme Goods"))
        );
        assert_eq!(view.profile().unwrap().businesses.len(), 1);

        assert_eq!(view.switch_to_user(), "Switched to personal account.");
        assert!(!view.account.is_merchant());
    }

    #[test]
    fn test_switch_to_merchant_requires_complete_business() {
        let view = offline();
        assert_eq!(
            view.switch_to_merchant(MerchantBusiness::new("acme", "Acme")).unwrap(),
            "Now using Acme."
        );
        assert!(view.switch_to_merchant(MerchantBusiness::new("", "Nameless")).is_err());
        assert!(view.account.is_merchant());
    }
}
