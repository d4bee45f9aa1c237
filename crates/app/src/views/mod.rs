//! Page controllers.
//!
//! Each controller holds the state one page needs and exposes the actions
//! its buttons and forms trigger. Rendering is left to the front-end.
//!
//! | Controller | Page |
//! |------------|------|
//! | [`Workspace`] | Dual-pane chat workspace with the Vibe Scroll |
//! | [`ProfileView`] | Profile, account switching and demo entry |
//! | [`MerchantDashboard`] | Brand editing and product/service listing |

pub mod merchant;
pub mod profile;
pub mod workspace;

pub use merchant::{ItemError, ItemForm, MerchantDashboard};
pub use profile::{ProfileStatus, ProfileView};
pub use workspace::{InputOutcome, Workspace, WorkspaceError};
