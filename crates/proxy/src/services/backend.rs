//! Client for the external Vant API.
//!
//! Typed wrappers around the backend routes the proxy forwards to. Non-success
//! responses keep the upstream status and body so write routes can pass them
//! through unchanged.

use std::sync::Arc;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;
use vant_core::{AddBusinessRequest, BrandInfo, MountRequest, MountResult, ProductHandle, UserProfile};

/// Header carrying the anonymous client id.
pub const CLIENT_ID_HEADER: &str = "X-Client-Id";

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {body}")]
    Api { status: u16, body: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Could not build a request URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Which brand view to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrandScope {
    /// Shopper-facing, read-only.
    Customer,
    /// Merchant dashboard.
    Merchant,
}

impl BrandScope {
    /// First path segment of the brand route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Customer => "mount",
            Self::Merchant => "merchant",
        }
    }
}

/// Backend API client.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            inner: Arc::new(BackendClientInner { client, base_url }),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Profile for a client.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a profile.
    #[instrument(skip(self))]
    pub async fn profile(&self, client_id: &str) -> Result<UserProfile, BackendError> {
        let request = self
            .inner
            .client
            .get(self.url("profile")?)
            .header(CLIENT_ID_HEADER, client_id);
        self.send(request).await
    }

    /// Add a merchant business to a client's profile.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a profile.
    #[instrument(skip(self))]
    pub async fn add_merchant_business(
        &self,
        client_id: &str,
        business_name: &str,
    ) -> Result<UserProfile, BackendError> {
        let request = self
            .inner
            .client
            .post(self.url("profile/merchant")?)
            .header(CLIENT_ID_HEADER, client_id)
            .json(&AddBusinessRequest {
                business_name: Some(business_name.to_string()),
            });
        self.send(request).await
    }

    /// Brand for a business.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a brand.
    #[instrument(skip(self))]
    pub async fn brand(&self, scope: BrandScope, business_name: &str) -> Result<BrandInfo, BackendError> {
        let url = self.brand_url(scope, business_name)?;
        self.send(self.inner.client.get(url)).await
    }

    /// Replace a merchant's brand.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a brand.
    #[instrument(skip(self, brand))]
    pub async fn update_brand(&self, business_name: &str, brand: &BrandInfo) -> Result<BrandInfo, BackendError> {
        let url = self.brand_url(BrandScope::Merchant, business_name)?;
        self.send(self.inner.client.put(url).json(brand)).await
    }

    /// Resolve a link to a business.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response names no business.
    #[instrument(skip(self))]
    pub async fn mount(&self, link: &str) -> Result<MountResult, BackendError> {
        let request = self.inner.client.post(self.url("mount")?).json(&MountRequest {
            link: Some(link.to_string()),
        });
        self.send(request).await
    }

    /// Products sold by the given businesses.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response is not a product list.
    #[instrument(skip(self))]
    pub async fn products(&self, stores: &str) -> Result<Vec<ProductHandle>, BackendError> {
        let mut url = self.url("mount/products")?;
        url.query_pairs_mut().append_pair("stores", stores);
        self.send(self.inner.client.get(url)).await
    }

    fn url(&self, path: &str) -> Result<Url, BackendError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    fn brand_url(&self, scope: BrandScope, business_name: &str) -> Result<Url, BackendError> {
        self.url(&format!(
            "{}/{}/brand",
            scope.path(),
            urlencoding::encode(business_name)
        ))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, "Backend returned non-success status");
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}
