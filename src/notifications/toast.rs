// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record, its `ToastId`, and the `Variant`
//! enum used throughout the notification system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unique identifier for a toast, e.g. `toast-3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(String);

impl ToastId {
    /// Formats the id for sequence number `seq` under `prefix`.
    pub(crate) fn new(prefix: &str, seq: u64) -> Self {
        Self(format!("{prefix}-{seq}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ToastId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ToastId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for ToastId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ToastId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Semantic category of a toast; drives presentation styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Operation completed successfully.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention but nothing failed.
    Warning,
    /// Neutral information.
    #[default]
    Info,
}

impl Variant {
    /// All variants, in declaration order.
    pub const ALL: [Variant; 4] = [
        Variant::Success,
        Variant::Error,
        Variant::Warning,
        Variant::Info,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no known [`Variant`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown toast variant: {0}")]
pub struct ParseVariantError(String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}

/// A notification to be displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    id: ToastId,
    message: String,
    variant: Variant,
}

impl Toast {
    pub(crate) fn new(id: ToastId, message: String, variant: Variant) -> Self {
        Self {
            id,
            message,
            variant,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ToastId {
        &self.id
    }

    /// Display text. Not validated; may be empty.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variant_is_info() {
        assert_eq!(Variant::default(), Variant::Info);
    }

    #[test]
    fn variant_parses_case_insensitively() {
        assert_eq!("success".parse::<Variant>(), Ok(Variant::Success));
        assert_eq!("ERROR".parse::<Variant>(), Ok(Variant::Error));
        assert_eq!(" Warning ".parse::<Variant>(), Ok(Variant::Warning));
        assert!("fatal".parse::<Variant>().is_err());
    }

    #[test]
    fn variant_display_matches_as_str() {
        for variant in Variant::ALL {
            assert_eq!(variant.to_string(), variant.as_str());
        }
    }

    #[test]
    fn toast_id_formats_prefix_and_sequence() {
        let id = ToastId::new("toast", 7);
        assert_eq!(id, "toast-7");
        assert_eq!(id, ToastId::from("toast-7"));
    }

    #[test]
    fn toast_serializes_with_lowercase_variant() {
        let toast = Toast::new(ToastId::new("toast", 1), "Saved".into(), Variant::Success);
        let encoded = toml::to_string(&toast).expect("toast should serialize");
        assert!(encoded.contains("id = \"toast-1\""));
        assert!(encoded.contains("variant = \"success\""));
    }
}
