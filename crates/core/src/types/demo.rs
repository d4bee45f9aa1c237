//! Canned data for the demonstration business.

use crate::slug::BusinessSlug;

use super::account::MerchantBusiness;
use super::brand::BrandInfo;
use super::profile::UserProfile;

/// Slug of the reserved demo business.
pub const DEMO_BUSINESS_SLUG: &str = "vant-demo-business";

/// Display name of the reserved demo business.
pub const DEMO_BUSINESS_NAME: &str = "Vant Demo Business";

/// Whether `business_name` designates the demo business.
#[must_use]
pub fn is_demo_business(business_name: &str) -> bool {
    BusinessSlug::normalize(business_name).as_str() == DEMO_BUSINESS_SLUG
}

/// Profile served while demo mode is on.
#[must_use]
pub fn demo_profile() -> UserProfile {
    UserProfile {
        client_id: "demo".to_string(),
        display_name: Some("Demo User".to_string()),
        email: Some("demo@vant.app".to_string()),
        businesses: vec![MerchantBusiness::new(DEMO_BUSINESS_SLUG, DEMO_BUSINESS_NAME)],
    }
}

/// Name the merchant dashboard greets with in demo mode.
pub const DEMO_STORE_NAME: &str = "Vant Demo Store";

/// Brand shoppers see for the demo business while demo mode is on.
#[must_use]
pub fn demo_brand() -> BrandInfo {
    canned_brand(DEMO_BUSINESS_NAME)
}

/// Brand the merchant dashboard loads for the demo business in demo mode.
#[must_use]
pub fn demo_merchant_brand() -> BrandInfo {
    canned_brand(DEMO_STORE_NAME)
}

fn canned_brand(welcome_name: &str) -> BrandInfo {
    BrandInfo {
        welcome_message: Some(format!("Welcome to {welcome_name}")),
        ethos: Some("Quality, simplicity, and a great shopping experience.".to_string()),
        brand_messages: None,
        initial_concierge_message: Some(
            "Hi! I'm your personal shopping assistant. I'm here to help you find exactly what \
             you're looking for, whether it's a gift, something for yourself, or inspiration. \
             Tell me what you love or what occasion you're shopping for, and I'll suggest the \
             best options for you."
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_identity() {
        assert!(is_demo_business("Vant Demo Business"));
        assert!(is_demo_business("vant-demo-business"));
        assert!(is_demo_business("  VANT demo   business "));
        assert!(!is_demo_business("Vant Demo"));
    }

    #[test]
    fn test_demo_profile_has_one_business() {
        let profile = demo_profile();
        assert_eq!(profile.businesses.len(), 1);
        assert_eq!(profile.businesses[0].slug, DEMO_BUSINESS_SLUG);
        assert_eq!(
            BusinessSlug::normalize(DEMO_BUSINESS_NAME).as_str(),
            DEMO_BUSINESS_SLUG
        );
    }

    #[test]
    fn test_demo_brands_differ_only_in_welcome() {
        let customer = demo_brand();
        let merchant = demo_merchant_brand();
        assert_eq!(customer.welcome_message.as_deref(), Some("Welcome to Vant Demo Business"));
        assert_eq!(merchant.welcome_message.as_deref(), Some("Welcome to Vant Demo Store"));
        assert_eq!(customer.ethos, merchant.ethos);
        assert_eq!(customer.initial_concierge_message, merchant.initial_concierge_message);
    }
}
