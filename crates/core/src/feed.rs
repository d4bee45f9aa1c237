//! Vibe Scroll: the product feed for active mounted businesses.

use std::collections::{BTreeSet, HashSet};

use crate::slug::BusinessSlug;
use crate::types::ProductHandle;
use crate::workspace::MountedBusiness;

/// Catalogue shown when no backend is configured.
#[must_use]
pub fn sample_catalog() -> Vec<ProductHandle> {
    [
        ("1", "nike-air-max-90", "Nike"),
        ("2", "cos-oversized-blazer", "COS"),
        ("3", "nike-dunk-low", "Nike"),
        ("4", "cos-minimal-blazer", "COS"),
        ("5", "aesop-resurrection-aromatique-hand-wash", "Aesop"),
        ("6", "aesop-geranium-leaf-body-cleanser", "Aesop"),
        ("7", "aesop-tacit-eau-de-parfum", "Aesop"),
    ]
    .into_iter()
    .map(|(id, handle, business)| ProductHandle::new(id, handle, business))
    .collect()
}

/// Keep the products sold by an active mounted business.
#[must_use]
pub fn feed_for(products: Vec<ProductHandle>, mounted: &[MountedBusiness]) -> Vec<ProductHandle> {
    let active: HashSet<&BusinessSlug> = mounted.iter().filter(|b| b.active).map(|b| &b.id).collect();
    products
        .into_iter()
        .filter(|p| active.contains(&BusinessSlug::normalize(&p.business)))
        .collect()
}

/// Panel state for the Vibe Scroll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VibeScroll {
    open: bool,
    expanded: Option<String>,
    vault: BTreeSet<String>,
}

impl VibeScroll {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub const fn open(&mut self) {
        self.open = true;
    }

    pub const fn close(&mut self) {
        self.open = false;
    }

    pub const fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Expand a card, or collapse it if it is already expanded.
    pub fn toggle_expanded(&mut self, product_id: &str) {
        if self.expanded.as_deref() == Some(product_id) {
            self.expanded = None;
        } else {
            self.expanded = Some(product_id.to_string());
        }
    }

    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.expanded.as_deref()
    }

    /// Save a product to the vault. Liking twice is a no-op.
    pub fn like(&mut self, product_id: &str) {
        self.vault.insert(product_id.to_string());
    }

    #[must_use]
    pub fn is_liked(&self, product_id: &str) -> bool {
        self.vault.contains(product_id)
    }

    /// Liked product ids in sorted order.
    pub fn vault(&self) -> impl Iterator<Item = &str> {
        self.vault.iter().map(String::as_str)
    }
}
