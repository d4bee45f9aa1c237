//! Application state shared across handlers.

use std::sync::Arc;

use moka::future::Cache;
use vant_core::{BrandInfo, BusinessSlug};

use crate::config::ProxyConfig;
use crate::services::{BackendClient, BackendError, BackendResolver, BrandScope, HeuristicResolver, LinkResolver};

/// Cache key for brand reads.
pub type BrandCacheKey = (BrandScope, BusinessSlug);

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// backend client (when one is configured), the link resolver and the brand
/// cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProxyConfig,
    backend: Option<BackendClient>,
    resolver: Box<dyn LinkResolver>,
    brand_cache: Cache<BrandCacheKey, BrandInfo>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// A backend client is built only when the API base lives on another
    /// origin; the link resolver follows from that.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: ProxyConfig) -> Result<Self, BackendError> {
        let backend = config
            .backend_url()
            .map(|url| BackendClient::new(url.clone(), config.upstream_timeout))
            .transpose()?;

        let resolver: Box<dyn LinkResolver> = match &backend {
            Some(client) => Box::new(BackendResolver::new(client.clone())),
            None => Box::new(HeuristicResolver),
        };

        Ok(Self::with_resolver(config, backend, resolver))
    }

    /// Create state with an explicit link resolver.
    #[must_use]
    pub fn with_resolver(
        config: ProxyConfig,
        backend: Option<BackendClient>,
        resolver: Box<dyn LinkResolver>,
    ) -> Self {
        let brand_cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.brand_cache_ttl)
            .build();

        tracing::info!(
            backend = backend.as_ref().map(|b| b.base_url().as_str()),
            "Proxy state initialized"
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                resolver,
                brand_cache,
            }),
        }
    }

    /// Get a reference to the proxy configuration.
    #[must_use]
    pub fn config(&self) -> &ProxyConfig {
        &self.inner.config
    }

    /// The backend client, if a backend is configured.
    #[must_use]
    pub fn backend(&self) -> Option<&BackendClient> {
        self.inner.backend.as_ref()
    }

    #[must_use]
    pub fn resolver(&self) -> &dyn LinkResolver {
        self.inner.resolver.as_ref()
    }

    #[must_use]
    pub fn brand_cache(&self) -> &Cache<BrandCacheKey, BrandInfo> {
        &self.inner.brand_cache
    }

    /// Drop cached brand reads for a business in every scope.
    pub async fn invalidate_brand(&self, business_name: &str) {
        let slug = BusinessSlug::normalize(business_name);
        for scope in [BrandScope::Customer, BrandScope::Merchant] {
            self.inner.brand_cache.invalidate(&(scope, slug.clone())).await;
        }
        tracing::debug!(%slug, "Brand cache invalidated");
    }
}
