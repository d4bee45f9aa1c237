//! Merchant brand route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use tracing::instrument;
use vant_core::BrandInfo;

use super::read_brand;
use crate::error::{AppError, Result};
use crate::services::BrandScope;
use crate::state::AppState;

/// Brand for the merchant dashboard. Empty without a backend or on failure.
#[instrument(skip(state))]
pub async fn get_brand(State(state): State<AppState>, Path(business_name): Path<String>) -> Json<BrandInfo> {
    Json(read_brand(&state, BrandScope::Merchant, &business_name).await)
}

/// Save a merchant's brand and drop its cached reads.
#[instrument(skip(state, body))]
pub async fn update_brand(
    State(state): State<AppState>,
    Path(business_name): Path<String>,
    body: std::result::Result<Json<BrandInfo>, JsonRejection>,
) -> Result<Json<BrandInfo>> {
    let backend = state.backend().ok_or_else(|| {
        AppError::BackendUnavailable("Run the API server and set VANT_API_BASE_URL to save brand.".to_string())
    })?;
    let Json(brand) = body.map_err(|_| AppError::BadRequest("Invalid JSON".to_string()))?;

    let saved = backend
        .update_brand(&business_name, &brand)
        .await
        .map_err(|e| AppError::from_backend(e, "Failed to save brand"))?;
    state.invalidate_brand(&business_name).await;

    tracing::info!(business_name = %business_name, "Brand saved");
    Ok(Json(saved))
}
