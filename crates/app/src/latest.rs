//! Latest-request-wins slot.
//!
//! A refetch started after another one must win even if it completes first.
//! Each request takes a [`Ticket`] when it starts; only the holder of the
//! newest ticket may commit its result.

use std::sync::{Mutex, PoisonError};

/// Sequence number handed out by [`Latest::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// A value written only by the most recently started request.
#[derive(Debug)]
pub struct Latest<T> {
    inner: Mutex<LatestInner<T>>,
}

#[derive(Debug)]
struct LatestInner<T> {
    issued: u64,
    value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(LatestInner {
                issued: 0,
                value: None,
            }),
        }
    }
}

impl<T: Clone> Latest<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request. Any older ticket becomes stale.
    pub fn begin(&self) -> Ticket {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.issued += 1;
        Ticket(inner.issued)
    }

    /// Whether `ticket` is still the newest one.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).issued == ticket.0
    }

    /// Store `value` if `ticket` is current. Returns whether it was stored.
    pub fn commit(&self, ticket: Ticket, value: T) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if inner.issued != ticket.0 {
            tracing::debug!(
                ticket = ticket.0,
                latest = inner.issued,
                "Discarding stale response"
            );
            return false;
        }
        inner.value = Some(value);
        true
    }

    /// Last committed value.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_ticket_wins_regardless_of_completion_order() {
        let slot = Latest::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.commit(second, "second"));
        assert!(!slot.commit(first, "first"));
        assert_eq!(slot.get(), Some("second"));
    }

    #[test]
    fn test_in_order_completion() {
        let slot = Latest::new();
        let first = slot.begin();
        assert!(slot.is_current(first));
        assert!(slot.commit(first, 1));

        let second = slot.begin();
        assert!(!slot.is_current(first));
        assert!(slot.commit(second, 2));
        assert_eq!(slot.get(), Some(2));
    }

    #[test]
    fn test_empty_until_committed() {
        let slot: Latest<u32> = Latest::new();
        let _ticket = slot.begin();
        assert_eq!(slot.get(), None);
    }
}
