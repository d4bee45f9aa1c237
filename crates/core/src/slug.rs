//! Business-name normalization.
//!
//! Every component that keys state by business (the mount reducer, the
//! brand/product accessors, the demo-identity check and the proxy cache)
//! goes through [`BusinessSlug::normalize`] so the same business always
//! lands on the same key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Path prefix for business-specific workspace pages.
pub const MOUNT_PATH_PREFIX: &str = "/mount/";

/// Normalized, URL-stable identifier for a business.
///
/// Lowercase, trimmed, with every run of whitespace collapsed into a single
/// hyphen. Normalizing an already-normalized slug is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BusinessSlug(String);

impl BusinessSlug {
    /// Derive the slug for a business name.
    #[must_use]
    pub fn normalize(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        Self(lower.split_whitespace().collect::<Vec<_>>().join("-"))
    }

    /// Get the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the slug is empty (the name was blank).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `name` normalizes to this slug.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        Self::normalize(name) == *self
    }
}

impl fmt::Display for BusinessSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BusinessSlug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turn a slug back into a human-readable business name.
///
/// `"acme-goods"` becomes `"Acme Goods"`.
#[must_use]
pub fn slug_to_display_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Workspace path for a business: `/mount/{encoded name}`.
#[must_use]
pub fn mount_path(business_name: &str) -> String {
    format!("{MOUNT_PATH_PREFIX}{}", urlencoding::encode(business_name))
}

/// Extract the business name designated by a navigation path.
///
/// Only the first segment after `/mount/` counts. Query strings and
/// fragments are ignored; a segment that is not valid percent-encoding is
/// returned as-is. A segment that decodes to whitespace is no business.
#[must_use]
pub fn business_from_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix(MOUNT_PATH_PREFIX)?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let segment = rest.get(..end)?;
    if segment.is_empty() {
        return None;
    }

    let decoded = urlencoding::decode(segment)
        .map_or_else(|_| segment.to_string(), std::borrow::Cow::into_owned);
    // A blank name has no slug, so it cannot designate a business page.
    if decoded.trim().is_empty() {
        return None;
    }
    Some(decoded)
}
