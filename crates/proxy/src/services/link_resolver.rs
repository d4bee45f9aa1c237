//! Link-to-business resolution for `POST /api/mount`.
//!
//! With a backend, resolution is delegated to it. Without one, the name is
//! guessed from the URL:
//!
//! ```text
//! https://instagram.com/acme.goods   -> "Acme goods"   (path segment)
//! https://www.shop-cos.example.com   -> "Shop-cos"     (first host label)
//! not a url                          -> "Store"
//! ```

use std::future::Future;
use std::pin::Pin;

use url::Url;

use super::backend::{BackendClient, BackendError};

/// Fallback name when a link cannot be parsed.
pub const FALLBACK_BUSINESS_NAME: &str = "Store";

/// Boxed future returned by [`LinkResolver::resolve`].
pub type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<String, BackendError>> + Send + 'a>>;

/// Turns an external link into a business name.
pub trait LinkResolver: Send + Sync {
    /// Resolve `link` to the name of the business it belongs to.
    fn resolve<'a>(&'a self, link: &'a str) -> ResolveFuture<'a>;
}

/// Delegates to the backend's `POST /mount`.
pub struct BackendResolver {
    backend: BackendClient,
}

impl BackendResolver {
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

impl LinkResolver for BackendResolver {
    fn resolve<'a>(&'a self, link: &'a str) -> ResolveFuture<'a> {
        Box::pin(async move {
            let result = self.backend.mount(link).await?;
            Ok(result.business_name)
        })
    }
}

/// Guesses the business name from the link itself. Never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicResolver;

impl LinkResolver for HeuristicResolver {
    fn resolve<'a>(&'a self, link: &'a str) -> ResolveFuture<'a> {
        let name = guess_business_name(link);
        Box::pin(async move { Ok(name) })
    }
}

/// Business name guessed from a URL.
#[must_use]
pub fn guess_business_name(link: &str) -> String {
    let Ok(url) = Url::parse(link.trim()) else {
        return FALLBACK_BUSINESS_NAME.to_string();
    };
    let Some(host) = url.host_str() else {
        return FALLBACK_BUSINESS_NAME.to_string();
    };
    let host = host.strip_prefix("www.").unwrap_or(host);

    let instagram_handle = url
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
        .filter(|_| host.contains("instagram.com"));

    let raw = instagram_handle.map_or_else(
        || host.split('.').next().unwrap_or_default().to_string(),
        |handle| {
            handle
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
                .collect()
        },
    );

    capitalize(&raw)
}

/// First character upper-cased, the rest lower-cased.
fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_instagram_handle() {
        assert_eq!(guess_business_name("https://instagram.com/acme"), "Acme");
        assert_eq!(
            guess_business_name("https://www.instagram.com/ACME.goods_co/"),
            "Acme goods co"
        );
    }

    #[test]
    fn test_host_label() {
        assert_eq!(guess_business_name("https://www.nike.com/t/air-max"), "Nike");
        assert_eq!(guess_business_name("http://shop.cos.com"), "Shop");
        assert_eq!(guess_business_name("https://instagram.com/"), "Instagram");
    }

    #[test]
    fn test_unparsable_falls_back() {
        assert_eq!(guess_business_name("not a link"), "Store");
        assert_eq!(guess_business_name(""), "Store");
    }

    #[tokio::test]
    async fn test_heuristic_resolver_never_fails() {
        let resolver = HeuristicResolver;
        assert_eq!(resolver.resolve("https://aesop.com").await.unwrap(), "Aesop");
        assert_eq!(resolver.resolve("mailto:x").await.unwrap(), "Store");
    }
}
