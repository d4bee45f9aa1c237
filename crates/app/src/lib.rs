//! Vant App - client-side application layer.
//!
//! Everything a Vant front-end needs besides rendering:
//!
//! - [`storage`] - durable and session-scoped key/value storage
//! - [`client_id`], [`account_mode`], [`demo_mode`] - persisted client state
//! - [`profile_items`] - merchant-entered products and services
//! - [`api`] - profile, brand, product and mount accessors
//! - [`views`] - workspace, profile and merchant dashboard controllers
//!
//! State services are constructed explicitly and wired together by
//! [`AppContext`]; nothing here is a process-wide global.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account_mode;
pub mod api;
pub mod client_id;
pub mod config;
pub mod context;
pub mod demo_mode;
pub mod latest;
pub mod profile_items;
pub mod storage;
pub mod views;

pub use account_mode::{AccountModeError, AccountModeStore};
pub use api::{AccessError, ApiClient, ApiConfig};
pub use client_id::ClientIdStore;
pub use config::{AppConfig, ConfigError};
pub use context::AppContext;
pub use demo_mode::DemoModeStore;
pub use latest::{Latest, Ticket};
pub use profile_items::ProfileItemStore;
pub use storage::{FileStorage, MemoryStorage, SharedStorage, Storage, StorageError, UnavailableStorage};
