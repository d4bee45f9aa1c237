//! Account-mode store: shopper vs. merchant for a specific business.
//!
//! The state is loaded from durable storage when the store is constructed,
//! written back on every switch, and broadcast to subscribers through a
//! `tokio::sync::watch` channel.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use vant_core::{AccountModeState, IncompleteBusiness, MerchantBusiness};

use crate::storage::{SharedStorage, read_json, write_json};

/// Durable storage key for the account mode.
pub const ACCOUNT_MODE_KEY: &str = "vant-account-mode";

/// Errors from account-mode switches.
#[derive(Debug, Error)]
pub enum AccountModeError {
    /// Merchant mode was requested without a slug and business name.
    #[error(transparent)]
    IncompleteBusiness(#[from] IncompleteBusiness),
}

/// Persisted account mode with change notifications.
#[derive(Clone)]
pub struct AccountModeStore {
    inner: Arc<AccountModeStoreInner>,
}

struct AccountModeStoreInner {
    storage: SharedStorage,
    tx: watch::Sender<AccountModeState>,
}

impl AccountModeStore {
    /// Create the store, reading any persisted state.
    ///
    /// Missing or malformed data falls back to user mode.
    #[must_use]
    pub fn load(storage: SharedStorage) -> Self {
        let state = read_json::<AccountModeState>(storage.as_ref(), ACCOUNT_MODE_KEY).unwrap_or_default();
        let (tx, _rx) = watch::channel(state);
        Self {
            inner: Arc::new(AccountModeStoreInner { storage, tx }),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> AccountModeState {
        self.inner.tx.borrow().clone()
    }

    #[must_use]
    pub fn is_merchant(&self) -> bool {
        self.inner.tx.borrow().is_merchant()
    }

    #[must_use]
    pub fn current_business(&self) -> Option<MerchantBusiness> {
        self.inner.tx.borrow().current_business().cloned()
    }

    /// Switch to shopper mode and clear the current business.
    pub fn switch_to_user(&self) {
        self.persist(AccountModeState::user());
    }

    /// Switch to merchant mode for `business`.
    ///
    /// # Errors
    ///
    /// Returns `AccountModeError::IncompleteBusiness` if the slug or name is
    /// blank; the current state is left unchanged.
    pub fn switch_to_merchant(&self, business: MerchantBusiness) -> Result<(), AccountModeError> {
        let next = AccountModeState::merchant(business)?;
        self.persist(next);
        Ok(())
    }

    /// Re-read the persisted state, as a page reload would.
    pub fn reload(&self) {
        let state =
            read_json::<AccountModeState>(self.inner.storage.as_ref(), ACCOUNT_MODE_KEY).unwrap_or_default();
        self.inner.tx.send_replace(state);
    }

    /// Observe switches. The receiver sees each new state as soon as it is set.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AccountModeState> {
        self.inner.tx.subscribe()
    }

    fn persist(&self, next: AccountModeState) {
        if let Err(e) = write_json(self.inner.storage.as_ref(), ACCOUNT_MODE_KEY, &next) {
            tracing::warn!(error = %e, "Could not persist account mode");
        }
        tracing::debug!(mode = %next.mode(), "Account mode switched");
        self.inner.tx.send_replace(next);
    }
}
