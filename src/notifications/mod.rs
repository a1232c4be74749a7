// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Toasts are short, non-blocking messages (save succeeded, request failed,
//! ...) that disappear on their own after a fixed delay or when the user
//! dismisses them.
//!
//! # Components
//!
//! - [`toast`] - `Toast` record, `ToastId`, and `Variant`
//! - [`queue`] - `ToastQueue`, the ordered collection of active toasts
//! - [`manager`] - `Manager` for auto-dismiss timers and snapshot broadcast
//! - [`scope`] - process-wide provider scope and free functions
//!
//! # Usage
//!
//! ```no_run
//! use mira_toasts::notifications::{scope, Manager, Snapshot, Variant};
//!
//! fn render(toasts: &Snapshot) {
//!     println!("{} toast(s)", toasts.len());
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> mira_toasts::Result<()> {
//! // Once at startup
//! let _scope = scope::provide(Manager::new(tokio::runtime::Handle::current()));
//!
//! // Anywhere else
//! scope::add_toast("Campaign saved", Variant::Success)?;
//!
//! // In the rendering surface
//! let mut toasts = scope::subscribe()?;
//! while toasts.changed().await.is_ok() {
//!     render(&toasts.borrow_and_update());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design Considerations
//!
//! - Toast duration: 4s for every variant, configurable at construction
//! - Order: oldest first; removal never reorders the rest
//! - Dismissal is idempotent, so timers are never cancelled

mod dismiss_delay;
pub mod manager;
pub mod queue;
pub mod scope;
pub mod toast;

pub use dismiss_delay::DismissDelay;
pub use manager::{Manager, Snapshot};
pub use queue::ToastQueue;
pub use scope::ScopeGuard;
pub use toast::{ParseVariantError, Toast, ToastId, Variant};
