//! The in-memory form model for the edit screen.
//!
//! Created empty when the form opens, populated once from the product
//! fetch, mutated field-by-field by seller actions, and read once by the
//! save step. An empty id field means "not set" throughout.

pub mod attributes;
pub mod images;
pub mod variants;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tradewind_core::{
    BrandId, CategoryId, ProductId, TagId, TaxId, WarrantyId, generate_slug,
};

use attributes::SpecificationValues;
use images::ImageSet;
use variants::VariantCollection;

/// Product-wide settings toggles.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ProductSettings {
    /// Whether the product can be returned.
    pub returnable: bool,
    /// Whether an order for it can be canceled.
    pub cancelable: bool,
    /// Whether cash-on-delivery is offered.
    pub cod_allowed: bool,
}

/// Everything the edit screen holds for one product.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormModel {
    pub product_id: ProductId,
    pub name: String,
    pub slug: String,
    pub category_id: CategoryId,
    pub tax_id: TaxId,
    pub brand_id: BrandId,
    pub warranty_id: WarrantyId,
    pub accessories_warranty_id: WarrantyId,
    pub description: String,
    pub tags: BTreeSet<TagId>,
    pub settings: ProductSettings,
    pub specifications: SpecificationValues,
    pub variants: VariantCollection,
    #[serde(skip)]
    pub images: ImageSet,
    /// Server-side last-update stamp, shown read-only by the shells.
    pub updated_at: Option<DateTime<Utc>>,
}

impl FormModel {
    /// Set the product name and regenerate the slug from it.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.slug = generate_slug(&self.name);
    }

    /// The selected category, if one is set.
    #[must_use]
    pub fn selected_category(&self) -> Option<&CategoryId> {
        (!self.category_id.is_empty()).then_some(&self.category_id)
    }

    /// Toggle a tag on or off.
    pub fn toggle_tag(&mut self, tag: TagId) {
        if !self.tags.remove(&tag) {
            self.tags.insert(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_name_regenerates_slug() {
        let mut form = FormModel::default();
        form.set_name("Oak Dining Table (6 Seats)");
        assert_eq!(form.slug, "oak-dining-table-6-seats");
    }

    #[test]
    fn test_selected_category_requires_non_empty_id() {
        let mut form = FormModel::default();
        assert!(form.selected_category().is_none());
        form.category_id = CategoryId::new("5");
        assert_eq!(form.selected_category(), Some(&CategoryId::new("5")));
    }

    #[test]
    fn test_toggle_tag() {
        let mut form = FormModel::default();
        form.toggle_tag(TagId::new("3"));
        assert!(form.tags.contains(&TagId::new("3")));
        form.toggle_tag(TagId::new("3"));
        assert!(form.tags.is_empty());
    }
}
