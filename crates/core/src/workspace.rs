//! Mount-state reducer for the dual-pane workspace.
//!
//! The workspace keeps an in-memory list of mounted businesses. It changes
//! in response to four events, all funnelled through [`MountState::apply`]:
//!
//! ```text
//! NavigationChanged(path)  add the path's business if absent, then prune
//! ExploreToggled(on)       prune
//! Mount(name)              add if absent (only when mounting is allowed)
//! ToggleActive(id)         flip one entry's `active` flag
//! ```
//!
//! Pruning: with explore mode off on a `/mount/{business}` path, only the
//! path's business stays mounted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::slug::{BusinessSlug, business_from_path};

/// Quick-pick businesses offered when nothing is mounted yet.
pub const SAMPLE_BUSINESSES: [&str; 3] = ["Nike", "COS", "Aesop"];

/// A business mounted into the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountedBusiness {
    pub id: BusinessSlug,
    pub name: String,
    pub favicon_path: String,
    /// Included in the product feed.
    pub active: bool,
}

impl MountedBusiness {
    /// New active entry for `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let id = BusinessSlug::normalize(name);
        let favicon_path = format!("/favicons/{id}.svg");
        Self {
            id,
            name: name.to_string(),
            favicon_path,
            active: true,
        }
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceEvent {
    NavigationChanged(String),
    ExploreToggled(bool),
    Mount(String),
    ToggleActive(BusinessSlug),
}

/// Mount rejected by the reducer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    /// Tried to mount another business on a business page without explore mode.
    #[error("Enable Explore mode to mount other businesses")]
    ExploreModeRequired,

    /// The business name was blank.
    #[error("Business name required")]
    EmptyName,
}

/// Mounted businesses plus the two inputs that constrain them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountState {
    mounted: Vec<MountedBusiness>,
    path: String,
    explore_mode: bool,
}

impl MountState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start on `path`, as if navigation had just landed there.
    #[must_use]
    pub fn at(path: &str) -> Self {
        let mut state = Self::new();
        state.navigate(path);
        state
    }

    /// Apply one event.
    ///
    /// # Errors
    ///
    /// Only `Mount` can fail: `ExploreModeRequired` when mounting is gated
    /// off, `EmptyName` for a blank name. A failed mount leaves the state
    /// untouched.
    pub fn apply(&mut self, event: WorkspaceEvent) -> Result<(), MountError> {
        match event {
            WorkspaceEvent::NavigationChanged(path) => self.navigate(&path),
            WorkspaceEvent::ExploreToggled(on) => self.set_explore_mode(on),
            WorkspaceEvent::Mount(name) => self.mount(&name)?,
            WorkspaceEvent::ToggleActive(id) => self.toggle_active(&id),
        }
        Ok(())
    }

    /// Record a navigation: add the path's business, then prune.
    pub fn navigate(&mut self, path: &str) {
        path.clone_into(&mut self.path);
        if let Some(name) = business_from_path(path) {
            self.insert(&name);
        }
        self.prune();
    }

    /// Turn explore mode on or off, pruning when it goes off.
    pub fn set_explore_mode(&mut self, on: bool) {
        self.explore_mode = on;
        self.prune();
    }

    /// Mount `name` if mounting is currently allowed.
    ///
    /// # Errors
    ///
    /// See [`MountState::apply`].
    pub fn mount(&mut self, name: &str) -> Result<(), MountError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MountError::EmptyName);
        }
        if !self.can_mount_other_businesses() {
            return Err(MountError::ExploreModeRequired);
        }
        self.insert(name);
        Ok(())
    }

    /// Flip `active` on the entry with `id`. Unknown ids are ignored.
    pub fn toggle_active(&mut self, id: &BusinessSlug) {
        if let Some(entry) = self.mounted.iter_mut().find(|b| b.id == *id) {
            entry.active = !entry.active;
        }
    }

    /// Mounted businesses in mount order.
    #[must_use]
    pub fn mounted(&self) -> &[MountedBusiness] {
        &self.mounted
    }

    /// Current navigation path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub const fn explore_mode(&self) -> bool {
        self.explore_mode
    }

    /// Business designated by the current path, if any.
    #[must_use]
    pub fn path_business(&self) -> Option<BusinessSlug> {
        business_from_path(&self.path).map(|name| BusinessSlug::normalize(&name))
    }

    /// The current path is a `/mount/{business}` page.
    #[must_use]
    pub fn is_on_business_path(&self) -> bool {
        business_from_path(&self.path).is_some()
    }

    /// New businesses may be mounted: off a business page, or in explore mode.
    #[must_use]
    pub fn can_mount_other_businesses(&self) -> bool {
        !self.is_on_business_path() || self.explore_mode
    }

    #[must_use]
    pub fn is_mounted(&self, id: &BusinessSlug) -> bool {
        self.mounted.iter().any(|b| b.id == *id)
    }

    /// Names of mounted businesses whose products belong in the feed.
    #[must_use]
    pub fn active_business_names(&self) -> Vec<String> {
        self.mounted
            .iter()
            .filter(|b| b.active)
            .map(|b| b.name.clone())
            .collect()
    }

    /// Sample businesses not mounted yet.
    #[must_use]
    pub fn unmounted_samples(&self) -> Vec<&'static str> {
        SAMPLE_BUSINESSES
            .into_iter()
            .filter(|name| !self.is_mounted(&BusinessSlug::normalize(name)))
            .collect()
    }

    fn insert(&mut self, name: &str) {
        let entry = MountedBusiness::new(name);
        if entry.id.is_empty() || self.is_mounted(&entry.id) {
            return;
        }
        self.mounted.push(entry);
    }

    fn prune(&mut self) {
        if self.explore_mode {
            return;
        }
        if let Some(keep) = self.path_business() {
            self.mounted.retain(|b| b.id == keep);
        }
    }
}

/// A trimmed, absolute `http`/`https` URL.
#[must_use]
pub fn is_link(text: &str) -> bool {
    url::Url::parse(text.trim()).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ids(state: &MountState) -> Vec<&str> {
        state.mounted().iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_navigation_mounts_path_business() {
        let state = MountState::at("/mount/Acme%20Goods");
        assert_eq!(ids(&state), ["acme-goods"]);
        let entry = &state.mounted()[0];
        assert_eq!(entry.name, "Acme Goods");
        assert_eq!(entry.favicon_path, "/favicons/acme-goods.svg");
        assert!(entry.active);
    }

    #[test]
    fn test_navigation_away_keeps_mounts() {
        let mut state = MountState::at("/mount/Nike");
        state.navigate("/");
        assert_eq!(ids(&state), ["nike"]);
        state.navigate("/profile");
        assert_eq!(ids(&state), ["nike"]);
    }

    #[test]
    fn test_blank_business_segment_is_not_a_business_page() {
        let mut state = MountState::new();
        state.mount("Nike").unwrap();
        state.navigate("/mount/%20");
        assert_eq!(ids(&state), ["nike"]);
        assert!(!state.is_on_business_path());
        assert!(state.can_mount_other_businesses());
        state.mount("COS").unwrap();
        assert_eq!(ids(&state), ["nike", "cos"]);
    }

    #[test]
    fn test_mount_twice_never_duplicates() {
        let mut state = MountState::new();
        state.mount("Nike").unwrap();
        state.mount("nike").unwrap();
        state.mount("  NIKE ").unwrap();
        assert_eq!(ids(&state), ["nike"]);

        let mut state = MountState::at("/mount/COS");
        state.set_explore_mode(true);
        state.mount("cos").unwrap();
        assert_eq!(ids(&state), ["cos"]);
    }

    #[test]
    fn test_mount_gated_on_business_path() {
        let mut state = MountState::at("/mount/Nike");
        assert!(!state.can_mount_other_businesses());
        assert_eq!(state.mount("COS"), Err(MountError::ExploreModeRequired));
        assert_eq!(ids(&state), ["nike"]);

        state.set_explore_mode(true);
        assert!(state.can_mount_other_businesses());
        state.mount("COS").unwrap();
        assert_eq!(ids(&state), ["nike", "cos"]);
    }

    #[test]
    fn test_mount_rejects_blank_name() {
        let mut state = MountState::new();
        assert_eq!(state.mount("   "), Err(MountError::EmptyName));
        assert!(state.mounted().is_empty());
    }

    #[test]
    fn test_explore_off_prunes_back_to_path_business() {
        let mut state = MountState::at("/mount/Nike");
        state.apply(WorkspaceEvent::ExploreToggled(true)).unwrap();
        state.apply(WorkspaceEvent::Mount("COS".to_string())).unwrap();
        state.apply(WorkspaceEvent::Mount("Aesop".to_string())).unwrap();
        assert_eq!(ids(&state), ["nike", "cos", "aesop"]);

        state.apply(WorkspaceEvent::ExploreToggled(false)).unwrap();
        assert_eq!(ids(&state), ["nike"]);
    }

    #[test]
    fn test_navigating_to_business_page_prunes_others() {
        let mut state = MountState::new();
        state.mount("Nike").unwrap();
        state.mount("COS").unwrap();
        state.navigate("/mount/Aesop");
        assert_eq!(ids(&state), ["aesop"]);
    }

    #[test]
    fn test_explore_on_navigation_is_additive() {
        let mut state = MountState::at("/mount/Nike");
        state.set_explore_mode(true);
        state.navigate("/mount/COS");
        assert_eq!(ids(&state), ["nike", "cos"]);

        state.set_explore_mode(false);
        assert_eq!(ids(&state), ["cos"]);
    }

    #[test]
    fn test_single_entry_invariant_without_explore() {
        let paths = ["/mount/Nike", "/mount/COS", "/mount/cos", "/mount/Aesop/x"];
        let mut state = MountState::new();
        state.mount("Other").unwrap();
        for path in paths {
            state.navigate(path);
            assert_eq!(state.mounted().len(), 1);
            assert_eq!(Some(state.mounted()[0].id.clone()), state.path_business());
        }
    }

    #[test]
    fn test_toggle_active() {
        let mut state = MountState::new();
        state.mount("Nike").unwrap();
        state.mount("COS").unwrap();

        state
            .apply(WorkspaceEvent::ToggleActive(BusinessSlug::normalize("COS")))
            .unwrap();
        assert!(state.mounted()[0].active);
        assert!(!state.mounted()[1].active);
        assert_eq!(state.active_business_names(), ["Nike"]);

        state.toggle_active(&BusinessSlug::normalize("missing"));
        assert_eq!(state.active_business_names(), ["Nike"]);

        state.toggle_active(&BusinessSlug::normalize("cos"));
        assert_eq!(state.active_business_names(), ["Nike", "COS"]);
    }

    #[test]
    fn test_unmounted_samples() {
        let mut state = MountState::new();
        assert_eq!(state.unmounted_samples(), ["Nike", "COS", "Aesop"]);
        state.mount("cos").unwrap();
        assert_eq!(state.unmounted_samples(), ["Nike", "Aesop"]);
    }

    #[test]
    fn test_is_link() {
        assert!(is_link("https://instagram.com/acme"));
        assert!(is_link("  http://shop.example.com/  "));
        assert!(!is_link("ftp://example.com"));
        assert!(!is_link("example.com"));
        assert!(!is_link("red running shoes"));
        assert!(!is_link(""));
    }
}
