//! HTTP route handlers for the proxy.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Health check
//!
//! # Profile
//! GET  /api/profile                         - Profile for X-Client-Id (empty without backend)
//! POST /api/profile/merchant                - Add a business (503 without backend)
//!
//! # Brand
//! GET  /api/merchant/{business_name}/brand  - Brand for the merchant dashboard
//! PUT  /api/merchant/{business_name}/brand  - Save brand (503 without backend)
//! GET  /api/mount/{business_name}/brand     - Brand shown to shoppers
//!
//! # Mount
//! POST /api/mount                           - Resolve a link to a business name
//! GET  /api/mount/products?stores=a,b       - Products for mounted businesses
//! ```
//!
//! Without a backend, reads answer with empty placeholders and writes with
//! 503. With one, reads degrade to placeholders on failure while writes pass
//! the upstream status and body through.

pub mod merchant;
pub mod mount;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};
use vant_core::{BrandInfo, BusinessSlug};

use crate::services::BrandScope;
use crate::state::AppState;

/// Create all `/api` routes.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(profile::get_profile))
        .route("/profile/merchant", post(profile::add_merchant_business))
        .route(
            "/merchant/{business_name}/brand",
            get(merchant::get_brand).put(merchant::update_brand),
        )
        .route("/mount", post(mount::mount_link))
        .route("/mount/products", get(mount::products))
        .route("/mount/{business_name}/brand", get(mount::get_brand))
}

/// Read a brand through the cache. Failures degrade to an empty brand and
/// are not cached.
pub(crate) async fn read_brand(state: &AppState, scope: BrandScope, business_name: &str) -> BrandInfo {
    let Some(backend) = state.backend() else {
        return BrandInfo::default();
    };

    let key = (scope, BusinessSlug::normalize(business_name));
    if let Some(brand) = state.brand_cache().get(&key).await {
        tracing::debug!(scope = scope.path(), business_name, "Brand cache hit");
        return brand;
    }

    match backend.brand(scope, business_name).await {
        Ok(brand) => {
            state.brand_cache().insert(key, brand.clone()).await;
            brand
        }
        Err(e) => {
            tracing::warn!(scope = scope.path(), business_name, error = %e, "Brand fetch failed");
            BrandInfo::default()
        }
    }
}
