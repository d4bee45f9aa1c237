//! Mount route handlers: link resolution, customer brand and products.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use tracing::instrument;
use vant_core::{BrandInfo, MountRequest, MountResult, ProductHandle};

use super::read_brand;
use crate::error::{AppError, Result};
use crate::services::BrandScope;
use crate::state::AppState;

/// Query for `GET /api/mount/products`.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Comma-separated business names.
    #[serde(default)]
    pub stores: Option<String>,
}

/// Resolve an external link to the business it belongs to.
#[instrument(skip(state, body))]
pub async fn mount_link(
    State(state): State<AppState>,
    body: std::result::Result<Json<MountRequest>, JsonRejection>,
) -> Result<Json<MountResult>> {
    let link = body
        .ok()
        .and_then(|Json(request)| request.link)
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing or invalid link".to_string()))?;

    let business_name = state
        .resolver()
        .resolve(&link)
        .await
        .map_err(|e| AppError::from_backend(e, "Mount failed"))?;

    tracing::info!(link = %link, business_name = %business_name, "Link resolved");
    Ok(Json(MountResult { business_name }))
}

/// Brand shown to shoppers. Empty without a backend or on failure.
#[instrument(skip(state))]
pub async fn get_brand(State(state): State<AppState>, Path(business_name): Path<String>) -> Json<BrandInfo> {
    Json(read_brand(&state, BrandScope::Customer, &business_name).await)
}

/// Products for the given businesses. Empty without a backend, without
/// stores, or on failure.
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>, Query(query): Query<ProductsQuery>) -> Json<Vec<ProductHandle>> {
    let stores = query.stores.unwrap_or_default();
    let Some(backend) = state.backend() else {
        return Json(Vec::new());
    };
    if stores.split(',').all(|s| s.trim().is_empty()) {
        return Json(Vec::new());
    }

    match backend.products(&stores).await {
        Ok(products) => Json(products),
        Err(e) => {
            tracing::warn!(stores = %stores, error = %e, "Product fetch failed");
            Json(Vec::new())
        }
    }
}
