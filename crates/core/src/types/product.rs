//! Product handles for the feed and merchant-entered products/services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product shown in the Vibe Scroll.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "WireProductHandle")]
pub struct ProductHandle {
    pub id: String,
    pub handle: String,
    /// Display name of the business selling the product.
    pub business: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// Incoming product shape. Older backends send `store` instead of `business`.
#[derive(Deserialize)]
struct WireProductHandle {
    id: String,
    handle: String,
    #[serde(default)]
    business: Option<String>,
    #[serde(default)]
    store: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<WireProductHandle> for ProductHandle {
    fn from(wire: WireProductHandle) -> Self {
        Self {
            id: wire.id,
            handle: wire.handle,
            business: wire.business.or(wire.store).unwrap_or_default(),
            thumbnail: wire.thumbnail,
        }
    }
}

impl ProductHandle {
    #[must_use]
    pub fn new(id: impl Into<String>, handle: impl Into<String>, business: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handle: handle.into(),
            business: business.into(),
            thumbnail: None,
        }
    }
}

/// Whether a merchant entry is a physical product or a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileItemKind {
    #[default]
    Product,
    Service,
}

impl std::str::FromStr for ProfileItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "product" => Ok(Self::Product),
            "service" => Ok(Self::Service),
            other => Err(format!("unknown item type: {other}")),
        }
    }
}

/// A product or service a merchant listed for their business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileItem {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ProfileItemKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Image URL (or data URL) shown on the feed card.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileItem {
    /// Feed card for this item, attributed to `business_name`.
    #[must_use]
    pub fn to_product_handle(&self, business_name: &str) -> ProductHandle {
        ProductHandle {
            id: self.id.clone(),
            handle: self.name.clone(),
            business: business_name.to_string(),
            thumbnail: self.image_url.clone(),
        }
    }
}

/// Fields supplied when listing a new product or service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewProfileItem {
    pub name: String,
    pub description: Option<String>,
    pub kind: ProfileItemKind,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

/// Partial update of a listed item. `None` leaves a field unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<ProfileItemKind>,
    pub price: Option<String>,
    pub image_url: Option<String>,
}

impl ProfileItemUpdate {
    /// Apply the update in place.
    pub fn apply(self, item: &mut ProfileItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(description) = self.description {
            item.description = Some(description);
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(price) = self.price {
            item.price = Some(price);
        }
        if let Some(image_url) = self.image_url {
            item.image_url = Some(image_url);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_handle_accepts_legacy_store_field() {
        let product: ProductHandle =
            serde_json::from_str(r#"{"id":"1","handle":"air-max","store":"Nike"}"#).unwrap();
        assert_eq!(product.business, "Nike");

        let product: ProductHandle = serde_json::from_str(
            r#"{"id":"1","handle":"air-max","business":"Nike","store":"Other","thumbnail":"/a.png"}"#,
        )
        .unwrap();
        assert_eq!(product.business, "Nike");
        assert_eq!(product.thumbnail.as_deref(), Some("/a.png"));

        let product: ProductHandle =
            serde_json::from_str(r#"{"id":"1","handle":"air-max"}"#).unwrap();
        assert_eq!(product.business, "");
    }

    #[test]
    fn test_profile_item_wire_format() {
        let raw = r#"{
            "id": "abc",
            "name": "Haircut",
            "type": "service",
            "price": "$30",
            "createdAt": "2026-01-02T03:04:05Z"
        }"#;
        let item: ProfileItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.kind, ProfileItemKind::Service);
        assert_eq!(item.description, None);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "service");
        assert_eq!(json["createdAt"], "2026-01-02T03:04:05Z");
        assert!(json.get("imageUrl").is_none());
    }

    #[test]
    fn test_update_only_touches_given_fields() {
        let mut item = ProfileItem {
            id: "abc".to_string(),
            name: "Mug".to_string(),
            description: Some("Ceramic".to_string()),
            kind: ProfileItemKind::Product,
            price: Some("12".to_string()),
            image_url: None,
            created_at: Utc::now(),
        };
        ProfileItemUpdate {
            price: Some("15".to_string()),
            ..ProfileItemUpdate::default()
        }
        .apply(&mut item);
        assert_eq!(item.name, "Mug");
        assert_eq!(item.description.as_deref(), Some("Ceramic"));
        assert_eq!(item.price.as_deref(), Some("15"));
    }

    #[test]
    fn test_item_kind_parse() {
        assert_eq!("Service".parse::<ProfileItemKind>(), Ok(ProfileItemKind::Service));
        assert_eq!("product".parse::<ProfileItemKind>(), Ok(ProfileItemKind::Product));
        assert!("bundle".parse::<ProfileItemKind>().is_err());
    }
}
