// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate.

// ==========================================================================
// Notification Defaults
// ==========================================================================

/// Default delay before a toast dismisses itself (in milliseconds).
pub const DEFAULT_DISMISS_DELAY_MS: u64 = 4000;

/// Minimum auto-dismiss delay (in milliseconds).
pub const MIN_DISMISS_DELAY_MS: u64 = 100;

/// Maximum auto-dismiss delay (in milliseconds).
pub const MAX_DISMISS_DELAY_MS: u64 = 60_000;

/// Prefix used when formatting toast identifiers (`toast-1`, `toast-2`, ...).
pub const DEFAULT_ID_PREFIX: &str = "toast";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_DISMISS_DELAY_MS > 0);
    assert!(MAX_DISMISS_DELAY_MS >= MIN_DISMISS_DELAY_MS);
    assert!(DEFAULT_DISMISS_DELAY_MS >= MIN_DISMISS_DELAY_MS);
    assert!(DEFAULT_DISMISS_DELAY_MS <= MAX_DISMISS_DELAY_MS);
    assert!(!DEFAULT_ID_PREFIX.is_empty());
};
