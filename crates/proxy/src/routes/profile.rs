//! Profile route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use tracing::instrument;
use vant_core::{AddBusinessRequest, UserProfile};

use crate::error::{AppError, Result};
use crate::services::CLIENT_ID_HEADER;
use crate::state::AppState;

fn client_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CLIENT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
}

/// Profile for the requesting client.
///
/// Never fails: no backend, or a backend error, yields an empty profile.
#[instrument(skip(state, headers))]
pub async fn get_profile(State(state): State<AppState>, headers: HeaderMap) -> Json<UserProfile> {
    let client_id = client_id(&headers).unwrap_or_default();
    let Some(backend) = state.backend() else {
        return Json(UserProfile::empty(client_id));
    };

    match backend.profile(&client_id).await {
        Ok(profile) => Json(profile),
        Err(e) => {
            tracing::warn!(error = %e, "Profile fetch failed, returning empty profile");
            Json(UserProfile::empty(client_id))
        }
    }
}

/// Add a business to the requesting client's profile.
#[instrument(skip(state, headers, body))]
pub async fn add_merchant_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Json<AddBusinessRequest>, JsonRejection>,
) -> Result<Json<UserProfile>> {
    let client_id = client_id(&headers).ok_or_else(|| AppError::BadRequest("Client ID required".to_string()))?;
    let Json(body) = body.map_err(|_| AppError::BadRequest("Invalid JSON".to_string()))?;
    let business_name = body
        .business_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::BadRequest("Business name required".to_string()))?;

    let backend = state.backend().ok_or_else(|| {
        AppError::BackendUnavailable(
            "Run the API server and set VANT_API_BASE_URL to add businesses.".to_string(),
        )
    })?;

    let profile = backend
        .add_merchant_business(&client_id, business_name)
        .await
        .map_err(|e| AppError::from_backend(e, "Failed to add business"))?;

    tracing::info!(business_name, "Merchant business added");
    Ok(Json(profile))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::json;

    use crate::routes::tests::{json_request, offline_state, send};

    #[tokio::test]
    async fn test_offline_profile_echoes_client_id() {
        let request = Request::get("/api/profile")
            .header("X-Client-Id", "client-1")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "clientId": "client-1", "businesses": [] }));
    }

    #[tokio::test]
    async fn test_add_business_validation_order() {
        // Client id is checked before the body.
        let request = Request::post("/api/profile/merchant").body(Body::from("nope")).unwrap();
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Client ID required");

        let request = Request::post("/api/profile/merchant")
            .header("X-Client-Id", "c1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid JSON");

        let mut request = json_request("POST", "/api/profile/merchant", &json!({ "businessName": "  " }));
        request.headers_mut().insert("X-Client-Id", "c1".parse().unwrap());
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Business name required");
    }

    #[tokio::test]
    async fn test_add_business_needs_backend() {
        let mut request = json_request("POST", "/api/profile/merchant", &json!({ "businessName": "Acme" }));
        request.headers_mut().insert("X-Client-Id", "c1".parse().unwrap());
        let (status, body) = send(offline_state(), request).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["message"].as_str().unwrap().contains("VANT_API_BASE_URL"));
    }
}
