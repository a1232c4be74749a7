// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss delay domain type.
//!
//! This module provides a type-safe wrapper for how long a toast stays
//! visible before it removes itself.

use crate::config::{DEFAULT_DISMISS_DELAY_MS, MAX_DISMISS_DELAY_MS, MIN_DISMISS_DELAY_MS};
use std::time::Duration;

/// Auto-dismiss delay in milliseconds.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (100 ms – 60 s).
///
/// # Example
///
/// ```
/// use mira_toasts::notifications::DismissDelay;
///
/// let delay = DismissDelay::from_millis(2500);
/// assert_eq!(delay.as_millis(), 2500);
///
/// // Values outside range are clamped
/// let too_long = DismissDelay::from_millis(600_000);
/// assert_eq!(too_long.as_millis(), 60_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DismissDelay(u64);

impl DismissDelay {
    /// Creates a new delay, clamping to valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(MIN_DISMISS_DELAY_MS, MAX_DISMISS_DELAY_MS))
    }

    /// Returns the delay in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for DismissDelay {
    fn default() -> Self {
        Self(DEFAULT_DISMISS_DELAY_MS)
    }
}

impl From<Duration> for DismissDelay {
    fn from(duration: Duration) -> Self {
        Self::from_millis(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }
}
