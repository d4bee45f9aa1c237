//! Shopper profile, including the businesses they run.

use serde::{Deserialize, Serialize};

use super::account::MerchantBusiness;

/// Profile returned by `GET /profile`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub client_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub businesses: Vec<MerchantBusiness>,
}

impl UserProfile {
    /// Placeholder profile for a client with no backend data.
    #[must_use]
    pub fn empty(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    /// Find a business by display name, ignoring case and surrounding space.
    #[must_use]
    pub fn find_business(&self, business_name: &str) -> Option<&MerchantBusiness> {
        let wanted = business_name.trim().to_lowercase();
        self.businesses
            .iter()
            .find(|b| b.business_name.trim().to_lowercase() == wanted)
    }
}
