//! Brand text a merchant shows to shoppers.

use serde::{Deserialize, Serialize};

/// Greeting, ethos and concierge copy for a business.
///
/// Every field is optional; an empty `BrandInfo` serializes as `{}` and is
/// what reads degrade to when no backend is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ethos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_messages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_concierge_message: Option<String>,
}

impl BrandInfo {
    /// Build from dashboard form fields. Blank fields become absent.
    #[must_use]
    pub fn from_form(welcome_message: &str, ethos: &str, initial_concierge_message: &str) -> Self {
        Self {
            welcome_message: non_blank(welcome_message),
            ethos: non_blank(ethos),
            brand_messages: None,
            initial_concierge_message: non_blank(initial_concierge_message),
        }
    }

    /// No field carries any content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.welcome_message.is_none()
            && self.ethos.is_none()
            && self.brand_messages.as_ref().is_none_or(Vec::is_empty)
            && self.initial_concierge_message.is_none()
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
