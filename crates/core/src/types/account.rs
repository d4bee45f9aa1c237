//! Account mode: whether the session acts as a shopper or as a merchant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which side of the marketplace the session is acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountMode {
    #[default]
    User,
    Merchant,
}

impl AccountMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Merchant => "merchant",
        }
    }
}

impl std::fmt::Display for AccountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A business the current client is a merchant for.
///
/// Also the shape of each entry in `UserProfile::businesses`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantBusiness {
    pub slug: String,
    pub business_name: String,
}

impl MerchantBusiness {
    #[must_use]
    pub fn new(slug: impl Into<String>, business_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            business_name: business_name.into(),
        }
    }

    /// Both the slug and the display name are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.slug.trim().is_empty() && !self.business_name.trim().is_empty()
    }
}

/// Rejected attempt to enter merchant mode without a usable business.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("merchant mode requires a business slug and name")]
pub struct IncompleteBusiness;

/// Account mode plus the business it applies to.
///
/// Fields are private so that `current_business` is always `Some` in
/// merchant mode and always `None` in user mode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "StoredAccountMode", from = "StoredAccountMode")]
pub struct AccountModeState {
    mode: AccountMode,
    current_business: Option<MerchantBusiness>,
}

impl AccountModeState {
    /// Shopper mode, no business selected.
    #[must_use]
    pub const fn user() -> Self {
        Self {
            mode: AccountMode::User,
            current_business: None,
        }
    }

    /// Merchant mode for `business`.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteBusiness` if the slug or name is blank.
    pub fn merchant(business: MerchantBusiness) -> Result<Self, IncompleteBusiness> {
        if !business.is_complete() {
            return Err(IncompleteBusiness);
        }
        Ok(Self {
            mode: AccountMode::Merchant,
            current_business: Some(business),
        })
    }

    #[must_use]
    pub const fn mode(&self) -> AccountMode {
        self.mode
    }

    #[must_use]
    pub const fn current_business(&self) -> Option<&MerchantBusiness> {
        self.current_business.as_ref()
    }

    #[must_use]
    pub const fn is_merchant(&self) -> bool {
        matches!(self.mode, AccountMode::Merchant)
    }
}

/// Persisted form of [`AccountModeState`].
///
/// Loose on purpose: anything that does not describe a complete merchant
/// business reads back as user mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAccountMode {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub current_business: Option<StoredBusiness>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBusiness {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
}

impl From<StoredAccountMode> for AccountModeState {
    fn from(stored: StoredAccountMode) -> Self {
        if stored.mode.as_deref() != Some("merchant") {
            return Self::user();
        }

        stored
            .current_business
            .and_then(|b| Some(MerchantBusiness::new(b.slug?, b.business_name?)))
            .and_then(|b| Self::merchant(b).ok())
            .unwrap_or_else(Self::user)
    }
}

impl From<AccountModeState> for StoredAccountMode {
    fn from(state: AccountModeState) -> Self {
        Self {
            mode: Some(state.mode.as_str().to_string()),
            current_business: state.current_business.map(|b| StoredBusiness {
                slug: Some(b.slug),
                business_name: Some(b.business_name),
            }),
        }
    }
}
