// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of active toasts.
//!
//! `ToastQueue` is the synchronous core of the notification system: it assigns
//! ids, keeps toasts in insertion order, and remembers when each one expires.
//! It never reads the clock; callers pass `now` to [`ToastQueue::prune_expired`].

use super::toast::{Toast, ToastId, Variant};
use crate::config::DEFAULT_ID_PREFIX;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    toast: Toast,
    expires_at: Instant,
}

/// Active toasts, oldest first.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    active: Vec<Entry>,
    next_id: u64,
    id_prefix: String,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastQueue {
    /// Creates an empty queue issuing `toast-N` ids.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ID_PREFIX)
    }

    /// Creates an empty queue issuing `{prefix}-N` ids.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            active: Vec::new(),
            next_id: 0,
            id_prefix: prefix.into(),
        }
    }

    /// Appends a toast that expires at `expires_at` and returns its freshly issued id.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        variant: Variant,
        expires_at: Instant,
    ) -> ToastId {
        self.next_id += 1;
        let id = ToastId::new(&self.id_prefix, self.next_id);
        self.active.push(Entry {
            toast: Toast::new(id.clone(), message.into(), variant),
            expires_at,
        });
        id
    }

    /// Removes the toast with `id`, keeping the others in order.
    ///
    /// Returns `false` when no such toast is active.
    pub fn remove(&mut self, id: &ToastId) -> bool {
        match self.active.iter().position(|entry| entry.toast.id() == id) {
            Some(pos) => {
                self.active.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Removes every toast whose deadline is at or before `now`.
    ///
    /// Returns the removed ids, oldest first.
    pub fn prune_expired(&mut self, now: Instant) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.active.retain(|entry| {
            if entry.expires_at <= now {
                expired.push(entry.toast.id().clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Removes every active toast, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    #[must_use]
    pub fn contains(&self, id: &ToastId) -> bool {
        self.active.iter().any(|entry| entry.toast.id() == id)
    }

    /// Returns the active toasts, oldest first.
    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.active.iter().map(|entry| &entry.toast)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
