// SPDX-License-Identifier: MPL-2.0
//! Process-wide access to the toast manager.
//!
//! The application provides a [`Manager`] once at startup with [`provide`] and
//! keeps the returned [`ScopeGuard`] alive for the whole session. Any code can
//! then enqueue or dismiss toasts through the free functions in this module
//! without threading the manager through every call.
//!
//! Scopes nest: the most recently provided live manager is current, and
//! dropping its guard restores the enclosing one. Calling into this module
//! while no scope is live fails with [`Error::NotInitialized`].
//!
//! ```
//! use mira_toasts::notifications::{scope, Manager, Variant};
//! use mira_toasts::Error;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! assert!(matches!(scope::add("too early"), Err(Error::NotInitialized)));
//!
//! let _scope = scope::provide(Manager::new(tokio::runtime::Handle::current()));
//! let id = scope::add_toast("Saved", Variant::Success).unwrap();
//! assert_eq!(id, "toast-1");
//! # }
//! ```

use super::manager::{Manager, Snapshot};
use super::toast::{ToastId, Variant};
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Live scopes, innermost last.
static SCOPES: Mutex<Vec<(ScopeId, Manager)>> = Mutex::new(Vec::new());

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Keeps a provided manager current until dropped.
#[must_use = "the scope is torn down as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ScopeGuard {
    id: ScopeId,
    manager: Manager,
}

impl ScopeGuard {
    /// The manager this scope provides.
    #[must_use]
    pub fn manager(&self) -> &Manager {
        &self.manager
    }
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let mut scopes = lock_scopes();
        // Guards may drop out of order; remove exactly this scope.
        scopes.retain(|(id, _)| *id != self.id);
        tracing::info!(remaining = scopes.len(), "toast scope torn down");
    }
}

/// Installs `manager` as the current process-wide manager.
pub fn provide(manager: Manager) -> ScopeGuard {
    let id = ScopeId::next();
    let mut scopes = lock_scopes();
    scopes.push((id, manager.clone()));
    tracing::info!(depth = scopes.len(), "toast scope provided");
    ScopeGuard { id, manager }
}

/// Returns the current manager.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn current() -> Result<Manager> {
    lock_scopes()
        .last()
        .map(|(_, manager)| manager.clone())
        .ok_or(Error::NotInitialized)
}

/// Returns `true` while at least one scope is live.
#[must_use]
pub fn is_initialized() -> bool {
    !lock_scopes().is_empty()
}

/// Adds a toast to the current manager.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn add_toast(message: impl Into<String>, variant: Variant) -> Result<ToastId> {
    Ok(current()?.add_toast(message, variant))
}

/// Adds an [`Info`](Variant::Info) toast to the current manager.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn add(message: impl Into<String>) -> Result<ToastId> {
    add_toast(message, Variant::default())
}

/// Dismisses a toast from the current manager.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn remove_toast(id: &ToastId) -> Result<bool> {
    Ok(current()?.remove_toast(id))
}

/// Returns the current manager's snapshot.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn snapshot() -> Result<Snapshot> {
    Ok(current()?.snapshot())
}

/// Subscribes to the current manager's snapshots.
///
/// # Errors
///
/// Returns [`Error::NotInitialized`] if no scope is live.
pub fn subscribe() -> Result<watch::Receiver<Snapshot>> {
    Ok(current()?.subscribe())
}

fn lock_scopes() -> MutexGuard<'static, Vec<(ScopeId, Manager)>> {
    SCOPES.lock().unwrap_or_else(PoisonError::into_inner)
}
