//! Profile, brand, product and mount accessors.
//!
//! Every accessor picks its data source in the same order:
//!
//! 1. demo mode is on and the target is the demo business → canned data
//! 2. the API base is this app's own origin (no backend) → empty placeholder
//! 3. otherwise → HTTP request to the API base
//!
//! Reads never fail: errors in step 3 degrade to the placeholder. Writes
//! return an [`AccessError`] carrying the server's `message` when it sent one.

mod error;

pub use error::AccessError;

use std::sync::Arc;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;
use vant_core::{
    AddBusinessRequest, ApiMessage, BrandInfo, MountRequest, MountResult, ProductHandle, UserProfile,
    demo_brand, demo_merchant_brand, demo_profile, is_demo_business,
};

use crate::client_id::ClientIdStore;
use crate::demo_mode::DemoModeStore;

/// Header carrying the anonymous client id.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the accessors send requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// External API base URL.
    pub base_url: Url,
    /// Origin this app is served from; hosts the `/api` proxy routes.
    pub origin: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ApiConfig {
    #[must_use]
    pub const fn new(base_url: Url, origin: Url) -> Self {
        Self {
            base_url,
            origin,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configuration with no separate backend.
    #[must_use]
    pub fn same_origin(origin: Url) -> Self {
        Self::new(origin.clone(), origin)
    }

    /// A real backend is configured (the API base is on another origin).
    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.base_url.origin() != self.origin.origin()
    }
}

/// Accessors for the external API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    config: ApiConfig,
    demo: DemoModeStore,
    client_id: ClientIdStore,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: ApiConfig, demo: DemoModeStore, client_id: ClientIdStore) -> Result<Self, AccessError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                config,
                demo,
                client_id,
            }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn has_backend(&self) -> bool {
        self.inner.config.has_backend()
    }

    #[must_use]
    pub fn demo(&self) -> &DemoModeStore {
        &self.inner.demo
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Current client's profile.
    ///
    /// Demo mode serves the canned demo profile; no backend or a failed
    /// request serves an empty profile for the current client id.
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> UserProfile {
        if self.inner.demo.is_active() {
            return demo_profile();
        }

        let client_id = self.inner.client_id.get_or_create();
        if !self.has_backend() {
            return UserProfile::empty(client_id);
        }

        let result = async {
            let url = self.api_url("profile")?;
            let request = self.inner.http.get(url).header(CLIENT_ID_HEADER, &client_id);
            self.send_json::<UserProfile>(request, "Failed to load profile").await
        }
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Profile fetch failed, using empty profile");
            UserProfile::empty(client_id)
        })
    }

    /// Register the current client as a merchant for `business_name`.
    ///
    /// # Errors
    ///
    /// - `Validation` if the name is blank
    /// - `BackendUnavailable` if no backend is configured
    /// - `Upstream` with the server's message (or "Failed to add business")
    #[instrument(skip(self))]
    pub async fn add_merchant_business(&self, business_name: &str) -> Result<UserProfile, AccessError> {
        let business_name = business_name.trim();
        if business_name.is_empty() {
            return Err(AccessError::Validation("Business name required".to_string()));
        }
        if !self.has_backend() {
            return Err(AccessError::BackendUnavailable(
                "Run the API server and set VANT_API_BASE_URL to add businesses.".to_string(),
            ));
        }

        let url = self.api_url("profile/merchant")?;
        let request = self
            .inner
            .http
            .post(url)
            .header(CLIENT_ID_HEADER, self.inner.client_id.get_or_create())
            .json(&AddBusinessRequest {
                business_name: Some(business_name.to_string()),
            });
        let profile = self.send_json(request, "Failed to add business").await?;
        tracing::info!(business_name, "Added merchant business");
        Ok(profile)
    }

    // =========================================================================
    // Brand
    // =========================================================================

    /// Brand shown to shoppers for a mounted business.
    #[instrument(skip(self))]
    pub async fn customer_brand(&self, business_name: &str) -> BrandInfo {
        self.fetch_brand("mount", business_name).await
    }

    /// Brand as seen in the merchant dashboard (for editing).
    #[instrument(skip(self))]
    pub async fn merchant_brand(&self, business_name: &str) -> BrandInfo {
        self.fetch_brand("merchant", business_name).await
    }

    async fn fetch_brand(&self, scope: &str, business_name: &str) -> BrandInfo {
        if self.inner.demo.is_active() && is_demo_business(business_name) {
            return if scope == "merchant" { demo_merchant_brand() } else { demo_brand() };
        }
        if !self.has_backend() {
            return BrandInfo::default();
        }

        let result = async {
            let url = self.api_url(&format!("{scope}/{}/brand", urlencoding::encode(business_name)))?;
            self.send_json::<BrandInfo>(self.inner.http.get(url), "Failed to load brand")
                .await
        }
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!(scope, business_name, error = %e, "Brand fetch failed, using empty brand");
            BrandInfo::default()
        })
    }

    /// Save a merchant's brand.
    ///
    /// # Errors
    ///
    /// - `BackendUnavailable` if no backend is configured
    /// - `Upstream` with the server's message (or "Failed to save brand")
    #[instrument(skip(self, brand))]
    pub async fn update_brand(&self, business_name: &str, brand: &BrandInfo) -> Result<BrandInfo, AccessError> {
        if !self.has_backend() {
            return Err(AccessError::BackendUnavailable(
                "Run the API server and set VANT_API_BASE_URL to save brand.".to_string(),
            ));
        }

        let url = self.api_url(&format!("merchant/{}/brand", urlencoding::encode(business_name)))?;
        let request = self.inner.http.put(url).json(brand);
        let saved = self.send_json(request, "Failed to save brand").await?;
        tracing::info!(business_name, "Saved brand");
        Ok(saved)
    }

    // =========================================================================
    // Mount & products
    // =========================================================================

    /// Resolve an external link to the business it belongs to.
    ///
    /// Without a backend the request goes to this origin's `/api/mount`
    /// route, which resolves the link itself.
    ///
    /// # Errors
    ///
    /// Returns `Upstream` ("Mount failed: ...") on a non-success response and
    /// `InvalidResponse` if the response names no business.
    #[instrument(skip(self))]
    pub async fn mount_from_link(&self, link: &str) -> Result<MountResult, AccessError> {
        let url = if self.has_backend() {
            self.api_url("mount")?
        } else {
            self.origin_url("api/mount")?
        };

        let response = self
            .inner
            .http
            .post(url)
            .json(&MountRequest {
                link: Some(link.to_string()),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = ApiMessage::extract(&body)
                .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            return Err(AccessError::Upstream {
                status: status.as_u16(),
                message: format!("Mount failed: {detail}"),
            });
        }

        let result: MountResult = response
            .json()
            .await
            .map_err(|e| AccessError::InvalidResponse(format!("Mount response unreadable: {e}")))?;
        if result.business_name.trim().is_empty() {
            return Err(AccessError::InvalidResponse(
                "Mount response missing businessName".to_string(),
            ));
        }

        tracing::info!(link, business_name = %result.business_name, "Resolved link");
        Ok(result)
    }

    /// Products for the given businesses.
    ///
    /// Empty when no names are given, when there is no backend, or when the
    /// request fails.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, business_names: &[String]) -> Vec<ProductHandle> {
        if business_names.is_empty() || !self.has_backend() {
            return Vec::new();
        }

        let result = async {
            let mut url = self.api_url("mount/products")?;
            url.query_pairs_mut().append_pair("stores", &business_names.join(","));
            self.send_json::<Vec<ProductHandle>>(self.inner.http.get(url), "Failed to load products")
                .await
        }
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Product fetch failed, using empty list");
            Vec::new()
        })
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn api_url(&self, path: &str) -> Result<Url, AccessError> {
        join_url(&self.inner.config.base_url, path)
    }

    fn origin_url(&self, path: &str) -> Result<Url, AccessError> {
        join_url(&self.inner.config.origin, path)
    }

    /// Send a request and decode a JSON success body.
    ///
    /// Non-success responses become `Upstream` with the body's `message`,
    /// or `fallback_message` when there is none.
    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback_message: &str,
    ) -> Result<T, AccessError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "API returned non-success status"
            );
            return Err(AccessError::Upstream {
                status: status.as_u16(),
                message: ApiMessage::extract(&body).unwrap_or_else(|| fallback_message.to_string()),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AccessError::InvalidResponse(format!("{fallback_message}: {e}")))
    }
}

/// Append `path` to `base`, keeping any path prefix the base already has.
fn join_url(base: &Url, path: &str) -> Result<Url, AccessError> {
    let joined = format!("{}/{}", base.as_str().trim_end_matches('/'), path.trim_start_matches('/'));
    Ok(Url::parse(&joined)?)
}
