// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the active toasts, schedules their auto-dismiss, and
//! broadcasts a fresh [`Snapshot`] to subscribers after every change.
//!
//! Every toast carries its deadline. Any access to the queue first drops the
//! toasts whose deadline has passed, so a toast is never observed at or after
//! `added + dismiss_delay`, however late the timer task runs.
//!
//! Each toast also gets its own one-shot timer task that wakes subscribers
//! once the deadline passes. Timers are never cancelled: an explicit dismiss
//! simply wins the race, and the timer firing later is a no-op.

use super::dismiss_delay::DismissDelay;
use super::queue::ToastQueue;
use super::toast::{Toast, ToastId, Variant};
use crate::config::NotificationConfig;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::{self, Instant};

/// Read-only view of the active toasts, oldest first.
pub type Snapshot = Arc<[Toast]>;

/// Shared handle to the toast queue.
///
/// Cloning is cheap; every clone drives the same queue.
#[derive(Debug, Clone)]
pub struct Manager {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    queue: Mutex<ToastQueue>,
    snapshot_tx: watch::Sender<Snapshot>,
    dismiss_delay: DismissDelay,
    runtime: Handle,
}

impl Manager {
    /// Creates a manager with the default delay and `toast-N` ids.
    ///
    /// Auto-dismiss timers are spawned on `runtime`.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self::build(ToastQueue::new(), DismissDelay::default(), runtime)
    }

    /// Creates a manager with a custom auto-dismiss delay.
    #[must_use]
    pub fn with_dismiss_delay(dismiss_delay: DismissDelay, runtime: Handle) -> Self {
        Self::build(ToastQueue::new(), dismiss_delay, runtime)
    }

    /// Creates a manager from the `[notifications]` settings.
    #[must_use]
    pub fn from_config(config: &NotificationConfig, runtime: Handle) -> Self {
        Self::build(
            ToastQueue::with_prefix(config.id_prefix()),
            config.dismiss_delay(),
            runtime,
        )
    }

    fn build(queue: ToastQueue, dismiss_delay: DismissDelay, runtime: Handle) -> Self {
        let (snapshot_tx, _) = watch::channel(Snapshot::from(Vec::new()));
        Self {
            inner: Arc::new(Inner {
                queue: Mutex::new(queue),
                snapshot_tx,
                dismiss_delay,
                runtime,
            }),
        }
    }

    /// Adds a toast and schedules its auto-dismiss.
    pub fn add_toast(&self, message: impl Into<String>, variant: Variant) -> ToastId {
        let deadline = Instant::now() + self.inner.dismiss_delay.as_duration();
        let id = {
            let mut queue = self.lock_queue();
            let id = queue.push(message, variant, deadline);
            self.publish(&queue);
            id
        };
        tracing::debug!(%id, %variant, "toast added");
        self.schedule_dismiss(&id, deadline);
        id
    }

    /// Adds an [`Info`](Variant::Info) toast.
    pub fn add(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, Variant::default())
    }

    pub fn success(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, Variant::Success)
    }

    pub fn info(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, Variant::Info)
    }

    pub fn warning(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, Variant::Warning)
    }

    pub fn error(&self, message: impl Into<String>) -> ToastId {
        self.add_toast(message, Variant::Error)
    }

    /// Dismisses a toast by its ID.
    ///
    /// Returns `true` if the toast was found and removed. Unknown or already
    /// dismissed ids are ignored.
    pub fn remove_toast(&self, id: &ToastId) -> bool {
        let removed = self.take(id);
        if removed {
            tracing::debug!(%id, "toast dismissed");
        }
        removed
    }

    /// Dismisses every active toast. Pending timers become no-ops.
    pub fn clear(&self) -> usize {
        let mut queue = self.lock_queue();
        let count = queue.clear();
        if count > 0 {
            self.publish(&queue);
            tracing::debug!(count, "toasts cleared");
        }
        count
    }

    /// Returns the current toasts, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let _queue = self.lock_queue();
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Subscribes to snapshot changes.
    ///
    /// The receiver starts at the current snapshot and is notified after
    /// every change. No-op dismissals do not notify.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_queue().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock_queue().is_empty()
    }

    #[must_use]
    pub fn dismiss_delay(&self) -> DismissDelay {
        self.inner.dismiss_delay
    }

    /// Returns `true` if both handles drive the same queue.
    #[must_use]
    pub fn ptr_eq(&self, other: &Manager) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn take(&self, id: &ToastId) -> bool {
        let mut queue = self.lock_queue();
        let removed = queue.remove(id);
        if removed {
            self.publish(&queue);
        }
        removed
    }

    fn schedule_dismiss(&self, id: &ToastId, deadline: Instant) {
        // Weak so pending timers never keep a torn-down manager alive.
        let inner = Arc::downgrade(&self.inner);
        let timer = self.inner.runtime.spawn(async move {
            time::sleep_until(deadline).await;
            if let Some(inner) = inner.upgrade() {
                let manager = Manager { inner };
                drop(manager.lock_queue());
            }
        });
        // A shut-down runtime drops the task on spawn. The deadline still
        // holds on the next access, but subscribers will not be woken.
        if timer.is_finished() {
            tracing::warn!(%id, "runtime is shut down, toast expiry will not notify subscribers");
        }
    }

    /// Removes toasts whose deadline has passed, publishing if any were.
    fn expire_due(&self, queue: &mut ToastQueue) {
        let expired = queue.prune_expired(Instant::now());
        if expired.is_empty() {
            return;
        }
        self.publish(queue);
        for id in &expired {
            tracing::debug!(%id, "toast expired");
        }
    }

    /// Must be called with the queue lock held so snapshots publish in order.
    fn publish(&self, queue: &ToastQueue) {
        self.inner
            .snapshot_tx
            .send_replace(queue.toasts().cloned().collect());
    }

    /// Locks the queue with every overdue toast already removed.
    fn lock_queue(&self) -> MutexGuard<'_, ToastQueue> {
        let mut queue = self
            .inner
            .queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.expire_due(&mut queue);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::sleep;

    fn manager() -> Manager {
        Manager::new(Handle::current())
    }

    fn ids(snapshot: &Snapshot) -> Vec<&str> {
        snapshot.iter().map(|t| t.id().as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn new_manager_is_empty() {
        let manager = manager();
        assert!(manager.is_empty());
        assert!(manager.snapshot().is_empty());
        assert_eq!(manager.dismiss_delay(), DismissDelay::default());
    }

    #[tokio::test(start_paused = true)]
    async fn add_and_remove_scenario() {
        let manager = manager();

        manager.add_toast("Saved", Variant::Success);
        let snapshot = manager.snapshot();
        assert_eq!(ids(&snapshot), ["toast-1"]);
        assert_eq!(snapshot[0].message(), "Saved");
        assert_eq!(snapshot[0].variant(), Variant::Success);

        manager.add_toast("Failed", Variant::Error);
        let snapshot = manager.snapshot();
        assert_eq!(ids(&snapshot), ["toast-1", "toast-2"]);
        assert_eq!(snapshot[1].message(), "Failed");
        assert_eq!(snapshot[1].variant(), Variant::Error);

        assert!(manager.remove_toast(&ToastId::from("toast-1")));
        let snapshot = manager.snapshot();
        assert_eq!(ids(&snapshot), ["toast-2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn add_without_variant_is_info() {
        let manager = manager();
        manager.add("Hi");
        assert_eq!(manager.snapshot()[0].variant(), Variant::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn shortcuts_set_matching_variant() {
        let manager = manager();
        manager.success("a");
        manager.info("b");
        manager.warning("c");
        manager.error("d");

        let variants: Vec<Variant> = manager.snapshot().iter().map(Toast::variant).collect();
        assert_eq!(
            variants,
            [Variant::Success, Variant::Info, Variant::Warning, Variant::Error]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn toast_expires_after_dismiss_delay() {
        let manager = manager();
        manager.add("Hi");

        sleep(Duration::from_millis(3999)).await;
        assert_eq!(manager.len(), 1);

        sleep(Duration::from_millis(2)).await;
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn toast_is_gone_exactly_at_deadline() {
        let manager = manager();
        let mut rx = manager.subscribe();
        manager.add("Hi");
        rx.mark_unchanged();

        sleep(Duration::from_millis(4000)).await;
        assert!(manager.is_empty());
        assert_eq!(manager.len(), 0);
        assert!(manager.snapshot().is_empty());
        assert!(rx.borrow_and_update().is_empty());
    }

    #[test]
    fn toasts_still_expire_after_runtime_shutdown() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .expect("failed to build runtime");
        let manager =
            Manager::with_dismiss_delay(DismissDelay::from_millis(100), runtime.handle().clone());
        drop(runtime);

        let mut rx = manager.subscribe();
        assert_eq!(manager.add("late"), "toast-1");
        assert_eq!(manager.len(), 1);
        rx.mark_unchanged();

        std::thread::sleep(Duration::from_millis(150));
        assert!(manager.is_empty());
        assert!(rx.has_changed().expect("manager still alive"));
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timers_are_independent_per_toast() {
        let manager = manager();
        let first = manager.add("first");

        sleep(Duration::from_millis(2000)).await;
        let second = manager.add("second");

        sleep(Duration::from_millis(2001)).await;
        let snapshot = manager.snapshot();
        assert_eq!(ids(&snapshot), [second.as_str()]);
        assert!(snapshot.iter().all(|t| t.id() != &first));

        sleep(Duration::from_millis(2000)).await;
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn explicit_removal_wins_over_pending_timer() {
        let manager = manager();
        let keep = manager.add("keep");
        sleep(Duration::from_millis(1000)).await;
        let id = manager.add("dismiss me");
        let mut rx = manager.subscribe();
        rx.mark_unchanged();

        sleep(Duration::from_millis(3999)).await;
        // `keep` expired at 4000 ms; only the second toast remains.
        assert_eq!(ids(&rx.borrow_and_update()), [id.as_str()]);
        assert!(!manager.snapshot().iter().any(|t| t.id() == &keep));

        assert!(manager.remove_toast(&id));
        assert!(manager.is_empty());
        rx.mark_unchanged();

        sleep(Duration::from_millis(2)).await;
        assert!(manager.is_empty());
        assert!(!rx.has_changed().expect("manager still alive"));
    }

    #[tokio::test(start_paused = true)]
    async fn removal_is_idempotent() {
        let manager = manager();
        let id = manager.add("once");
        manager.add("other");

        assert!(manager.remove_toast(&id));
        assert!(!manager.remove_toast(&id));
        assert!(!manager.remove_toast(&ToastId::from("toast-99")));
        assert_eq!(manager.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_see_each_change() {
        let manager = manager();
        let mut rx = manager.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        let id = manager.add("hello");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(rx.borrow_and_update().len(), 1);

        manager.remove_toast(&ToastId::from("toast-404"));
        assert!(!rx.has_changed().expect("sender alive"));

        manager.remove_toast(&id);
        assert!(rx.has_changed().expect("sender alive"));
        assert!(rx.borrow_and_update().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_is_woken_by_expiry() {
        let manager = manager();
        let mut rx = manager.subscribe();
        manager.add("bye");
        rx.mark_unchanged();

        rx.changed().await.expect("sender alive");
        assert!(rx.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn clear_drops_everything_and_timers_stay_harmless() {
        let manager = manager();
        manager.add("a");
        manager.add("b");
        sleep(Duration::from_millis(1000)).await;

        assert_eq!(manager.clear(), 2);
        assert!(manager.is_empty());
        assert_eq!(manager.clear(), 0);

        let late = manager.add("late");
        // Timers for `a` and `b` fire at 4000 ms and find nothing to remove.
        sleep(Duration::from_millis(3001)).await;
        assert_eq!(ids(&manager.snapshot()), [late.as_str()]);
    }

    #[tokio::test(start_paused = true)]
    async fn custom_delay_and_prefix_from_config() {
        let config = NotificationConfig {
            dismiss_delay_ms: Some(500),
            id_prefix: Some("notice".to_string()),
        };
        let manager = Manager::from_config(&config, Handle::current());

        assert_eq!(manager.add("hi"), "notice-1");
        sleep(Duration::from_millis(499)).await;
        assert_eq!(manager.len(), 1);
        sleep(Duration::from_millis(2)).await;
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn with_dismiss_delay_overrides_default() {
        let delay = DismissDelay::from_millis(1500);
        let manager = Manager::with_dismiss_delay(delay, Handle::current());
        assert_eq!(manager.dismiss_delay(), delay);

        manager.warning("short-lived");
        sleep(Duration::from_millis(1501)).await;
        assert!(manager.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn pending_timers_do_not_keep_manager_alive() {
        let manager = manager();
        let mut rx = manager.subscribe();
        manager.add("orphan");
        rx.mark_unchanged();
        drop(manager);

        // Sender is gone once the last handle drops, despite the pending timer.
        assert!(rx.changed().await.is_err());
        sleep(Duration::from_millis(5000)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_same_queue() {
        let manager = manager();
        let other = manager.clone();
        other.add("shared");

        assert!(manager.ptr_eq(&other));
        assert_eq!(manager.len(), 1);
        assert!(!manager.ptr_eq(&Manager::new(Handle::current())));
    }
}
