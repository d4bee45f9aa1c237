//! Vant Core - Shared types library.
//!
//! This crate provides common types used across all Vant components:
//! - `app` - Client-side stores, accessors and view controllers
//! - `proxy` - Thin HTTP proxy in front of the external API
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no storage access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Wire types for profiles, brands, products and account mode
//! - [`slug`] - Business-name normalization shared by every component
//! - [`workspace`] - The mount-state reducer behind the dual-pane workspace
//! - [`feed`] - Vibe Scroll product feed filtering and panel state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod feed;
pub mod slug;
pub mod types;
pub mod workspace;

pub use slug::{BusinessSlug, business_from_path, mount_path, slug_to_display_name};
pub use types::*;
pub use workspace::{MountError, MountState, MountedBusiness, WorkspaceEvent};
