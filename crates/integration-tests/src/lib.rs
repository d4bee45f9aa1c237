//! Integration tests for Vant.
//!
//! Everything runs in-process: a fake external API, the proxy in front of
//! it, and the app accessors talking to the proxy, each on an ephemeral
//! port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vant-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `proxy_*` - proxy routes against the fake API
//! - `app_*` - app accessors and controllers against the proxy

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use url::Url;
use vant_app::storage::SharedStorage;
use vant_app::{ApiConfig, AppContext, MemoryStorage};
use vant_core::{BrandInfo, BusinessSlug, MerchantBusiness, MountRequest, UserProfile};
use vant_proxy::{AppState, ProxyConfig};

/// Public origin the proxy believes it is served from.
pub const PROXY_PUBLIC_URL: &str = "http://localhost:3000";

/// Origin used by app contexts that talk to a backend.
pub const APP_ORIGIN: &str = "http://app.vant.test";

// =============================================================================
// Servers
// =============================================================================

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// A local URL nothing is listening on.
pub async fn unreachable_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}

/// Start the proxy, forwarding to `api_base` when given.
pub async fn spawn_proxy(api_base: Option<&Url>) -> Url {
    let api_base = api_base.map(Url::to_string);
    let config = ProxyConfig::from_lookup(|key| match key {
        "VANT_PUBLIC_URL" => Some(PROXY_PUBLIC_URL.to_string()),
        "VANT_API_BASE_URL" => api_base.clone(),
        "VANT_UPSTREAM_TIMEOUT_SECS" => Some("2".to_string()),
        _ => None,
    })
    .unwrap();
    let state = AppState::new(config).unwrap();
    spawn(vant_proxy::app(state)).await
}

/// App services with in-memory storage.
///
/// `base_url` is where the accessors send requests; the app is treated as
/// having a backend whenever its origin differs from `origin`.
pub fn app_context(base_url: Url, origin: Url) -> AppContext {
    let config = ApiConfig::new(base_url, origin);
    let durable: SharedStorage = Arc::new(MemoryStorage::new());
    let session: SharedStorage = Arc::new(MemoryStorage::new());
    AppContext::new(config, durable, session).unwrap()
}

/// App services whose backend is the proxy's `/api` routes.
pub fn app_via_proxy(proxy: &Url) -> AppContext {
    app_context(proxy.join("api").unwrap(), Url::parse(APP_ORIGIN).unwrap())
}

// =============================================================================
// Fake external API
// =============================================================================

/// In-memory stand-in for the external Vant API.
///
/// - `Taken` cannot be added as a business (409 with a JSON message)
/// - brand reads for `Broken` fail with 500
/// - brand writes for `Locked` fail with a plain-text 403
/// - links containing `unknown` cannot be resolved (422)
#[derive(Clone, Default)]
pub struct FakeBackend {
    inner: Arc<FakeBackendInner>,
}

#[derive(Default)]
struct FakeBackendInner {
    businesses: Mutex<HashMap<String, Vec<MerchantBusiness>>>,
    brands: Mutex<HashMap<String, BrandInfo>>,
    brand_reads: AtomicUsize,
    client_ids: Mutex<Vec<String>>,
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the fake API and return its base URL.
    pub async fn spawn(&self) -> Url {
        let router = Router::new()
            .route("/profile", get(profile))
            .route("/profile/merchant", post(add_business))
            .route("/merchant/{name}/brand", get(brand).put(save_brand))
            .route("/mount/{name}/brand", get(brand))
            .route("/mount", post(mount))
            .route("/mount/products", get(products))
            .with_state(self.clone());
        spawn(router).await
    }

    /// Number of brand GETs served so far.
    #[must_use]
    pub fn brand_reads(&self) -> usize {
        self.inner.brand_reads.load(Ordering::SeqCst)
    }

    /// Client ids seen on profile requests, in order.
    #[must_use]
    pub fn client_ids(&self) -> Vec<String> {
        self.inner.client_ids.lock().unwrap().clone()
    }

    fn profile_for(&self, client_id: &str) -> UserProfile {
        let businesses = self
            .inner
            .businesses
            .lock()
            .unwrap()
            .get(client_id)
            .cloned()
            .unwrap_or_default();
        UserProfile {
            businesses,
            ..UserProfile::empty(client_id)
        }
    }

    fn record_client_id(&self, headers: &HeaderMap) -> String {
        let id = headers
            .get("x-client-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.inner.client_ids.lock().unwrap().push(id.clone());
        id
    }
}

async fn profile(State(backend): State<FakeBackend>, headers: HeaderMap) -> Json<UserProfile> {
    let client_id = backend.record_client_id(&headers);
    Json(backend.profile_for(&client_id))
}

async fn add_business(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let client_id = backend.record_client_id(&headers);
    let name = body["businessName"].as_str().unwrap_or_default().trim().to_string();
    if name == "Taken" {
        return (StatusCode::CONFLICT, Json(json!({ "message": "Business already exists" }))).into_response();
    }

    let slug = BusinessSlug::normalize(&name).to_string();
    backend
        .inner
        .businesses
        .lock()
        .unwrap()
        .entry(client_id.clone())
        .or_default()
        .push(MerchantBusiness::new(slug, name));
    Json(backend.profile_for(&client_id)).into_response()
}

async fn brand(State(backend): State<FakeBackend>, Path(name): Path<String>) -> Response {
    backend.inner.brand_reads.fetch_add(1, Ordering::SeqCst);
    if name == "Broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let brand = backend.inner.brands.lock().unwrap().get(&name).cloned();
    Json(brand.unwrap_or_else(|| BrandInfo {
        welcome_message: Some(format!("Welcome to {name}")),
        ..BrandInfo::default()
    }))
    .into_response()
}

async fn save_brand(
    State(backend): State<FakeBackend>,
    Path(name): Path<String>,
    Json(brand): Json<BrandInfo>,
) -> Response {
    if name == "Locked" {
        return (StatusCode::FORBIDDEN, "forbidden").into_response();
    }
    backend.inner.brands.lock().unwrap().insert(name, brand.clone());
    Json(brand).into_response()
}

async fn mount(Json(body): Json<MountRequest>) -> Response {
    let link = body.link.unwrap_or_default();
    if link.contains("unknown") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Could not resolve link" })),
        )
            .into_response();
    }
    Json(json!({ "businessName": "Acme" })).into_response()
}

/// Products use the legacy `store` field.
async fn products(Query(query): Query<HashMap<String, String>>) -> Json<serde_json::Value> {
    let stores = query.get("stores").cloned().unwrap_or_default();
    let items: Vec<_> = stores
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .enumerate()
        .map(|(i, store)| {
            json!({
                "id": format!("p{i}"),
                "handle": format!("{}-item", BusinessSlug::normalize(store)),
                "store": store.trim(),
            })
        })
        .collect();
    Json(json!(items))
}
