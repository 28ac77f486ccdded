//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The platform wire
//! transports every id as a string, so the wrappers hold `String` and an
//! empty id means "not yet assigned" (a row the server has never seen).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Ord`, `Hash`, `Default`
/// - Conversion methods: `new()`, `as_str()`, `is_empty()`
/// - `From<String>`, `From<&str>`, and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use tradewind_core::define_id;
/// define_id!(ProductId);
/// define_id!(BrandId);
///
/// let product_id = ProductId::new("17");
/// let brand_id = BrandId::new("17");
///
/// // These are different types, so this won't compile:
/// // let _: ProductId = brand_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether this ID is empty (not yet assigned by the server).
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(SellerId);
define_id!(ProductId);
define_id!(VariantId);
define_id!(CategoryId);
define_id!(TaxId);
define_id!(BrandId);
define_id!(ColorId);
define_id!(SizeId);
define_id!(MaterialId);
define_id!(PatternId);
define_id!(UnitId);
define_id!(CountryId);
define_id!(TagId);
define_id!(WarrantyId);
define_id!(AttributeId);
define_id!(ImageId);

/// Client-only identity for an in-memory variant row.
///
/// Stable for the lifetime of the variant list and never sent to the
/// server; a fresh key is minted for every newly added or copied row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantKey(Uuid);

impl VariantKey {
    /// Mint a fresh key.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new("42");
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
        assert!(!id.is_empty());
    }

    #[test]
    fn test_empty_id_means_unassigned() {
        let id = VariantId::default();
        assert!(id.is_empty());
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn test_ids_compare_by_value() {
        assert_eq!(BrandId::new("3"), BrandId::from("3"));
        assert_ne!(BrandId::new("3"), BrandId::new("4"));
    }

    #[test]
    fn test_variant_keys_are_unique() {
        let a = VariantKey::fresh();
        let b = VariantKey::fresh();
        assert_ne!(a, b);
    }
}
