//! Command implementations.
//!
//! Every command works on an [`AppContext`] whose durable state lives in
//! `VANT_STATE_DIR/storage.json`. Session state (demo mode) lives next to
//! it in `session.json` so it survives between invocations of one shell
//! session; `vant demo exit` clears it.

#![allow(clippy::print_stdout)]

pub mod merchant;
pub mod profile;
pub mod workspace;

use std::sync::Arc;

use thiserror::Error;
use vant_app::storage::SharedStorage;
use vant_app::views::{ItemError, WorkspaceError};
use vant_app::{AccessError, AccountModeError, AppConfig, AppContext, ConfigError, FileStorage, StorageError};

/// Session storage file inside the state directory.
const SESSION_FILE: &str = "session.json";

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{}", .0.user_message())]
    Access(#[from] AccessError),

    #[error(transparent)]
    AccountMode(#[from] AccountModeError),

    #[error(transparent)]
    Item(#[from] ItemError),

    #[error("Could not save: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error("No business selected. Switch to merchant mode or pass --business.")]
    NoBusiness,

    #[error("No business named {0} in your profile")]
    UnknownBusiness(String),

    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Build the client context from the environment.
pub fn context() -> Result<AppContext, CommandError> {
    let config = AppConfig::from_env()?;
    let durable: SharedStorage = Arc::new(FileStorage::in_dir(&config.state_dir));
    let session: SharedStorage = Arc::new(FileStorage::at(config.state_dir.join(SESSION_FILE)));
    Ok(AppContext::new(config.api, durable, session)?)
}

/// `--business` if given, else the current merchant business.
fn business_slug(ctx: &AppContext, business: Option<&str>) -> Result<String, CommandError> {
    if let Some(slug) = business {
        return Ok(vant_core::BusinessSlug::normalize(slug).to_string());
    }
    ctx.account
        .current_business()
        .map(|business| business.slug)
        .ok_or(CommandError::NoBusiness)
}
