//! Category-specific attributes and their values.
//!
//! The platform defines a flat pool of dynamic attributes, each tagged
//! with the category ids it applies to. The form shows only the subset
//! matching the selected category; values the seller already entered for
//! other categories are kept (and submitted) rather than purged.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use tradewind_core::{AttributeId, CategoryId};

use crate::api::types::AttributeRow;

/// How an attribute is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttributeKind {
    /// Free-form text input.
    Text,
    /// One of a fixed set of options.
    Select,
}

/// A dynamic attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub id: AttributeId,
    pub label: String,
    pub kind: AttributeKind,
    /// Categories this attribute applies to.
    pub applicable_category_ids: BTreeSet<CategoryId>,
    /// Options to choose from; only populated for `Select`.
    pub options: Vec<String>,
}

impl Attribute {
    /// Build an attribute from its wire row.
    ///
    /// The applicable-category list is parsed from a comma-separated
    /// field; empty entries are dropped. Unknown input types fall back to
    /// text.
    #[must_use]
    pub fn from_row(row: AttributeRow) -> Self {
        let kind = if row.input_type.trim().eq_ignore_ascii_case("select") {
            AttributeKind::Select
        } else {
            AttributeKind::Text
        };

        let applicable_category_ids = row
            .category_ids
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(CategoryId::new)
            .collect();

        let options = if kind == AttributeKind::Select {
            row.values
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: AttributeId::new(row.id),
            label: row.name,
            kind,
            applicable_category_ids,
            options,
        }
    }

    /// Whether this attribute applies to the given category.
    #[must_use]
    pub fn applies_to(&self, category_id: &CategoryId) -> bool {
        self.applicable_category_ids.contains(category_id)
    }
}

/// The attributes applicable to the selected category, in input order.
///
/// Returns an empty list when no category is selected, regardless of the
/// attribute pool. Pure: recomputed from its inputs on every call.
#[must_use]
pub fn attributes_for_category<'a>(
    attributes: &'a [Attribute],
    selected: Option<&CategoryId>,
) -> Vec<&'a Attribute> {
    let Some(category_id) = selected else {
        return Vec::new();
    };
    attributes
        .iter()
        .filter(|a| a.applies_to(category_id))
        .collect()
}

/// Specification values keyed by attribute id.
///
/// An absent key means unset. Keys referencing attributes that no longer
/// apply (after a category change) are tolerated and submitted verbatim;
/// the filter above simply stops showing them.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SpecificationValues(BTreeMap<AttributeId, String>);

impl SpecificationValues {
    /// Build from the wire map of attribute id to value.
    #[must_use]
    pub fn from_wire(values: BTreeMap<String, String>) -> Self {
        Self(
            values
                .into_iter()
                .map(|(id, value)| (AttributeId::new(id), value))
                .collect(),
        )
    }

    /// The value for an attribute, if set.
    #[must_use]
    pub fn get(&self, id: &AttributeId) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Set the value for an attribute.
    pub fn set(&mut self, id: AttributeId, value: impl Into<String>) {
        self.0.insert(id, value.into());
    }

    /// Clear the value for an attribute.
    pub fn unset(&mut self, id: &AttributeId) {
        self.0.remove(id);
    }

    /// All stored values, including stale keys.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributeId, &str)> {
        self.0.iter().map(|(id, value)| (id, value.as_str()))
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no value is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
