//! Core types for Vant.
//!
//! Wire types use camelCase JSON so they match the external API and the
//! `/api` proxy routes byte for byte.

pub mod account;
pub mod api;
pub mod brand;
pub mod demo;
pub mod product;
pub mod profile;

pub use account::{AccountMode, AccountModeState, IncompleteBusiness, MerchantBusiness, StoredAccountMode};
pub use api::{AddBusinessRequest, ApiMessage, MountRequest, MountResult};
pub use brand::BrandInfo;
pub use demo::{
    DEMO_BUSINESS_NAME, DEMO_BUSINESS_SLUG, DEMO_STORE_NAME, demo_brand, demo_merchant_brand, demo_profile,
    is_demo_business,
};
pub use product::{NewProfileItem, ProductHandle, ProfileItem, ProfileItemKind, ProfileItemUpdate};
pub use profile::UserProfile;
