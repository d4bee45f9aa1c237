//! Dual-pane workspace: chat on one side, mounted businesses and the
//! Vibe Scroll on the other.

use thiserror::Error;
use tracing::instrument;
use vant_core::feed::{VibeScroll, feed_for, sample_catalog};
use vant_core::workspace::is_link;
use vant_core::{BusinessSlug, MountError, MountState, ProductHandle, WorkspaceEvent};

use crate::api::ApiClient;
use crate::latest::Latest;
use crate::profile_items::ProfileItemStore;

/// Errors shown inline under the chat input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("Enable Explore mode to mount other businesses")]
    ExploreModeRequired,

    #[error("Business name required")]
    EmptyName,

    /// Link resolution failed; nothing was mounted.
    #[error("{0}")]
    MountFailed(String),
}

impl From<MountError> for WorkspaceError {
    fn from(err: MountError) -> Self {
        match err {
            MountError::ExploreModeRequired => Self::ExploreModeRequired,
            MountError::EmptyName => Self::EmptyName,
        }
    }
}

/// What a chat submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputOutcome {
    /// Blank input.
    Ignored,
    /// Added to the chat.
    Message,
    /// A link resolved to this business, which is now mounted.
    Mounted(String),
}

/// Workspace controller.
pub struct Workspace {
    api: ApiClient,
    items: ProfileItemStore,
    state: MountState,
    messages: Vec<String>,
    vibe: VibeScroll,
    feed: Latest<Vec<ProductHandle>>,
}

impl Workspace {
    /// Workspace opened at `path`.
    #[must_use]
    pub fn new(api: ApiClient, items: ProfileItemStore, path: &str) -> Self {
        Self {
            api,
            items,
            state: MountState::at(path),
            messages: Vec::new(),
            vibe: VibeScroll::new(),
            feed: Latest::new(),
        }
    }

    // =========================================================================
    // Mount state
    // =========================================================================

    pub fn navigate(&mut self, path: &str) {
        self.apply(WorkspaceEvent::NavigationChanged(path.to_string()));
    }

    pub fn set_explore(&mut self, on: bool) {
        self.apply(WorkspaceEvent::ExploreToggled(on));
    }

    pub fn toggle_explore(&mut self) {
        self.set_explore(!self.state.explore_mode());
    }

    pub fn toggle_active(&mut self, id: &BusinessSlug) {
        self.apply(WorkspaceEvent::ToggleActive(id.clone()));
    }

    /// Mount one of the quick-pick sample businesses.
    ///
    /// # Errors
    ///
    /// Returns `ExploreModeRequired` when mounting is gated off.
    pub fn mount_sample(&mut self, name: &str) -> Result<(), WorkspaceError> {
        self.state.apply(WorkspaceEvent::Mount(name.to_string()))?;
        tracing::debug!(name, "Mounted sample business");
        Ok(())
    }

    #[must_use]
    pub const fn state(&self) -> &MountState {
        &self.state
    }

    fn apply(&mut self, event: WorkspaceEvent) {
        // Only `Mount` can be rejected.
        if let Err(e) = self.state.apply(event) {
            tracing::debug!(error = %e, "Workspace event rejected");
        }
    }

    // =========================================================================
    // Chat
    // =========================================================================

    /// Handle a chat submission.
    ///
    /// A well-formed `http`/`https` link is resolved to a business and
    /// mounted. Accepted input (a resolved link or plain text) joins the
    /// chat; the first message opens the Vibe Scroll.
    ///
    /// # Errors
    ///
    /// For links only: `ExploreModeRequired` before any request is made when
    /// mounting is gated off, or `MountFailed` when resolution fails.
    #[instrument(skip(self))]
    pub async fn submit_input(&mut self, text: &str) -> Result<InputOutcome, WorkspaceError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(InputOutcome::Ignored);
        }

        if is_link(text) {
            if !self.state.can_mount_other_businesses() {
                return Err(WorkspaceError::ExploreModeRequired);
            }
            let resolved = self
                .api
                .mount_from_link(text)
                .await
                .map_err(|e| WorkspaceError::MountFailed(e.user_message()))?;
            self.state.apply(WorkspaceEvent::Mount(resolved.business_name.clone()))?;
            self.push_message(text);
            return Ok(InputOutcome::Mounted(resolved.business_name));
        }

        self.push_message(text);
        Ok(InputOutcome::Message)
    }

    fn push_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
        if self.messages.len() == 1 {
            self.vibe.open();
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    // =========================================================================
    // Vibe Scroll
    // =========================================================================

    #[must_use]
    pub const fn vibe(&self) -> &VibeScroll {
        &self.vibe
    }

    pub const fn vibe_mut(&mut self) -> &mut VibeScroll {
        &mut self.vibe
    }

    /// Rebuild the feed for the active mounted businesses.
    ///
    /// Remote products (or the sample catalogue without a backend) are
    /// combined with items merchants listed locally, then filtered to the
    /// active businesses. Only the most recent refresh is kept.
    pub async fn refresh_feed(&self) -> Vec<ProductHandle> {
        let ticket = self.feed.begin();
        let mounted = self.state.mounted().to_vec();

        let mut products = if self.api.has_backend() {
            self.api.fetch_products(&self.state.active_business_names()).await
        } else {
            sample_catalog()
        };
        for business in &mounted {
            products.extend(
                self.items
                    .list(business.id.as_str())
                    .iter()
                    .map(|item| item.to_product_handle(&business.name)),
            );
        }

        let feed = feed_for(products, &mounted);
        self.feed.commit(ticket, feed.clone());
        feed
    }

    /// Last committed feed.
    #[must_use]
    pub fn feed(&self) -> Vec<ProductHandle> {
        self.feed.get().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use url::Url;
    use vant_core::NewProfileItem;

    use super::*;
    use crate::api::ApiConfig;
    use crate::api::tests::{ORIGIN, client, fake_backend, spawn};
    use crate::storage::MemoryStorage;

    fn items() -> ProfileItemStore {
        ProfileItemStore::new(Arc::new(MemoryStorage::new()))
    }

    fn offline(path: &str) -> Workspace {
        let (api, _demo) = client(ApiConfig::same_origin(Url::parse(ORIGIN).unwrap()));
        Workspace::new(api, items(), path)
    }

    async fn online(path: &str) -> Workspace {
        let base = spawn(fake_backend()).await;
        let (api, _demo) = client(ApiConfig::new(base, Url::parse(ORIGIN).unwrap()));
        Workspace::new(api, items(), path)
    }

    fn names(ws: &Workspace) -> Vec<&str> {
        ws.state().mounted().iter().map(|b| b.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_first_message_opens_vibe_scroll() {
        let mut ws = offline("/");
        assert_eq!(ws.submit_input("   ").await.unwrap(), InputOutcome::Ignored);
        assert!(!ws.vibe().is_open());

        assert_eq!(ws.submit_input("show me jackets").await.unwrap(), InputOutcome::Message);
        assert!(ws.vibe().is_open());

        ws.vibe_mut().close();
        ws.submit_input("and shoes").await.unwrap();
        assert!(!ws.vibe().is_open());
        assert_eq!(ws.messages(), ["show me jackets", "and shoes"]);
    }

    #[tokio::test]
    async fn test_link_blocked_without_explore_on_business_page() {
        let mut ws = online("/mount/Nike").await;
        let err = ws.submit_input("https://instagram.com/acme").await.unwrap_err();
        assert_eq!(err.to_string(), "Enable Explore mode to mount other businesses");
        assert_eq!(names(&ws), ["Nike"]);

        ws.toggle_explore();
        let outcome = ws.submit_input("https://instagram.com/acme").await.unwrap();
        assert_eq!(outcome, InputOutcome::Mounted("Acme".to_string()));
        assert_eq!(names(&ws), ["Nike", "Acme"]);
        // Only the accepted submission reaches the chat.
        assert_eq!(ws.messages(), ["https://instagram.com/acme"]);
    }

    #[tokio::test]
    async fn test_resolved_link_joins_chat_and_opens_vibe() {
        let mut ws = online("/").await;
        let outcome = ws.submit_input(" https://instagram.com/acme ").await.unwrap();
        assert_eq!(outcome, InputOutcome::Mounted("Acme".to_string()));
        assert_eq!(ws.messages(), ["https://instagram.com/acme"]);
        assert!(ws.vibe().is_open());
    }

    #[tokio::test]
    async fn test_failed_resolution_mounts_nothing() {
        let mut ws = online("/").await;
        let err = ws.submit_input("https://unknown.example.com").await.unwrap_err();
        assert_eq!(
            err,
            WorkspaceError::MountFailed("Mount failed: Could not resolve link".to_string())
        );
        assert!(ws.state().mounted().is_empty());
        assert!(ws.messages().is_empty());
    }

    #[test]
    fn test_explore_off_prunes_to_path_business() {
        let mut ws = offline("/mount/COS");
        assert_eq!(ws.mount_sample("Aesop"), Err(WorkspaceError::ExploreModeRequired));

        ws.set_explore(true);
        ws.mount_sample("Aesop").unwrap();
        ws.mount_sample("Nike").unwrap();
        assert_eq!(names(&ws), ["COS", "Aesop", "Nike"]);

        ws.set_explore(false);
        assert_eq!(names(&ws), ["COS"]);
    }

    #[tokio::test]
    async fn test_offline_feed_uses_sample_catalog_and_local_items() {
        let mut ws = offline("/");
        ws.mount_sample("Aesop").unwrap();
        ws.mount_sample("Acme").unwrap();
        ws.items
            .add(
                "acme",
                NewProfileItem {
                    name: "Canvas Tote".to_string(),
                    ..NewProfileItem::default()
                },
            )
            .unwrap();

        let feed = ws.refresh_feed().await;
        assert_eq!(feed.len(), 4);
        assert_eq!(feed.iter().filter(|p| p.business == "Aesop").count(), 3);
        assert_eq!(feed[3].handle, "Canvas Tote");
        assert_eq!(feed[3].business, "Acme");

        ws.toggle_active(&BusinessSlug::normalize("Aesop"));
        let feed = ws.refresh_feed().await;
        assert_eq!(feed.len(), 1);
        assert_eq!(ws.feed(), feed);
    }

    #[tokio::test]
    async fn test_online_feed_requests_active_businesses() {
        let mut ws = online("/").await;
        ws.mount_sample("Nike").unwrap();
        ws.mount_sample("COS").unwrap();
        ws.toggle_active(&BusinessSlug::normalize("COS"));

        let feed = ws.refresh_feed().await;
        let handles: Vec<_> = feed.iter().map(|p| p.handle.as_str()).collect();
        assert_eq!(handles, ["Nike-item"]);
    }
}
