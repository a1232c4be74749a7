// SPDX-License-Identifier: MPL-2.0
//! `mira_toasts` is the toast notification manager of the MIRA persona
//! campaign front end.
//!
//! It keeps an ordered queue of transient notifications, dismisses each one
//! after a fixed delay, and makes the queue reachable from anywhere in the
//! process through a provided scope.

pub mod config;
pub mod error;
pub mod notifications;

pub use error::{Error, Result};
