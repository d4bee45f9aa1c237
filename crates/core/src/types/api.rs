//! Request and response bodies shared by the proxy and the accessors.

use serde::{Deserialize, Serialize};

/// Body of `POST /mount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountRequest {
    #[serde(default)]
    pub link: Option<String>,
}

/// Response of `POST /mount`: the business a link resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountResult {
    pub business_name: String,
}

/// Body of `POST /profile/merchant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBusinessRequest {
    #[serde(default)]
    pub business_name: Option<String>,
}

/// Error body returned by the API and the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Pull `message` out of an arbitrary JSON error body.
    #[must_use]
    pub fn extract(body: &str) -> Option<String> {
        serde_json::from_str::<Self>(body)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.trim().is_empty())
    }
}
