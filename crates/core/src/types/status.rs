//! Shared enums for variant configuration.
//!
//! The platform wire encodes these as loosely-typed strings; the engine
//! keeps real enums internally and converts at the serialization boundary.

use serde::{Deserialize, Serialize};

/// How a variant is packaged.
///
/// `Packet` variants carry packet-only fields (variant type, height, pack,
/// flavour); `Loose` variants hide them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    #[default]
    Packet,
    Loose,
}

impl VariantKind {
    /// Parse a wire value, case-insensitive.
    ///
    /// Unrecognized or missing values fall back to `Packet`, matching the
    /// server's own default for legacy rows.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("loose") {
            Self::Loose
        } else {
            Self::Packet
        }
    }

    /// The wire spelling of this kind.
    #[must_use]
    pub const fn as_wire(&self) -> &'static str {
        match self {
            Self::Packet => "packet",
            Self::Loose => "loose",
        }
    }
}

/// Whether a variant's stock is tracked.
///
/// Semantically a product-level setting: the loader derives it from the
/// product's unlimited-stock flag and save re-aggregates it across all
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    /// Stock is tracked; the quantity field is required.
    #[default]
    Limited,
    /// Stock is not tracked; the quantity field is hidden.
    Unlimited,
}

impl StockPolicy {
    /// Derive the policy from the product-level unlimited-stock flag.
    #[must_use]
    pub const fn from_unlimited_flag(unlimited: bool) -> Self {
        if unlimited { Self::Unlimited } else { Self::Limited }
    }
}

/// A tri-state boolean rendered as `Yes`/`No` in seller-facing forms.
///
/// Only used at the wire boundary; internal state holds `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Parse a wire value. Accepts `Yes`/`No` (any case), `1`/`0`, and
    /// `true`/`false`; anything else is `No`.
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        let v = value.trim();
        if v.eq_ignore_ascii_case("yes") || v == "1" || v.eq_ignore_ascii_case("true") {
            Self::Yes
        } else {
            Self::No
        }
    }

    /// Whether this is `Yes`.
    #[must_use]
    pub const fn as_bool(&self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value { Self::Yes } else { Self::No }
    }
}

impl std::fmt::Display for YesNo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}
