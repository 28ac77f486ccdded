//! Load-state store for the form's reference data.
//!
//! Eleven independent selection lists (categories, taxes, brands, colors,
//! sizes, materials, patterns, units, countries, tags, warranties) plus
//! the dynamic attribute pool. Fetches run concurrently and each failure
//! is recovered locally as a loaded-empty list so one outage can never
//! wedge the form; the gate that releases the product fetch is the AND of
//! the eleven selection lists being loaded. The attribute pool loads
//! alongside but does not participate in the gate.

use tracing::warn;

use tradewind_core::{
    BrandId, ColorId, CountryId, MaterialId, PatternId, SizeId, TagId, TaxId, UnitId, WarrantyId,
};

use crate::api::categories::CategoryOption;
use crate::api::types::NamedRow;
use crate::api::{ApiError, PlatformClient};
use crate::form::attributes::Attribute;

/// Load state of one reference list.
///
/// Once a list reaches `Loaded` it never reverts for the lifetime of the
/// store; failures land as `Loaded` with an empty item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
}

/// One reference list plus its load state.
#[derive(Debug, Clone)]
pub struct ReferenceList<T> {
    items: Vec<T>,
    status: LoadStatus,
}

impl<T> Default for ReferenceList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            status: LoadStatus::NotLoaded,
        }
    }
}

impl<T> ReferenceList<T> {
    /// The loaded items, in server order. Empty until loaded (and empty
    /// forever if the fetch failed).
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The current load state.
    #[must_use]
    pub const fn status(&self) -> LoadStatus {
        self.status
    }

    /// Whether this list has finished loading.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    fn begin(&mut self) {
        if self.status == LoadStatus::NotLoaded {
            self.status = LoadStatus::Loading;
        }
    }

    fn finish(&mut self, items: Vec<T>) {
        self.items = items;
        self.status = LoadStatus::Loaded;
    }
}

/// A selectable `{ id, label }` pair for dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice<Id> {
    pub id: Id,
    pub label: String,
}

impl<Id: From<String>> Choice<Id> {
    fn from_row(row: NamedRow) -> Self {
        Self {
            id: row.id.into(),
            label: row.name,
        }
    }
}

/// The store behind every selection control on the edit form.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub categories: ReferenceList<CategoryOption>,
    pub taxes: ReferenceList<Choice<TaxId>>,
    pub brands: ReferenceList<Choice<BrandId>>,
    pub colors: ReferenceList<Choice<ColorId>>,
    pub sizes: ReferenceList<Choice<SizeId>>,
    pub materials: ReferenceList<Choice<MaterialId>>,
    pub patterns: ReferenceList<Choice<PatternId>>,
    pub units: ReferenceList<Choice<UnitId>>,
    pub countries: ReferenceList<Choice<CountryId>>,
    pub tags: ReferenceList<Choice<TagId>>,
    pub warranties: ReferenceList<Choice<WarrantyId>>,
    /// Dynamic attribute pool; loads alongside the lists above but is not
    /// part of the product-load gate.
    pub attributes: ReferenceList<Attribute>,
}

impl ReferenceData {
    /// Fetch every list concurrently.
    ///
    /// Each failed fetch is logged and recovered as loaded-empty; this
    /// method never fails.
    pub async fn load_all(&mut self, client: &PlatformClient) {
        self.categories.begin();
        self.taxes.begin();
        self.brands.begin();
        self.colors.begin();
        self.sizes.begin();
        self.materials.begin();
        self.patterns.begin();
        self.units.begin();
        self.countries.begin();
        self.tags.begin();
        self.warranties.begin();
        self.attributes.begin();

        let (
            categories,
            taxes,
            brands,
            colors,
            sizes,
            materials,
            patterns,
            units,
            countries,
            tags,
            warranties,
            attributes,
        ) = tokio::join!(
            client.get_categories(),
            client.get_taxes(),
            client.get_brands(),
            client.get_colors(),
            client.get_sizes(),
            client.get_materials(),
            client.get_patterns(),
            client.get_units(),
            client.get_countries(),
            client.get_tags(),
            client.get_warranties(),
            client.get_attributes(),
        );

        self.categories.finish(recover("categories", categories));
        self.taxes.finish(choices(recover("taxes", taxes)));
        self.brands.finish(choices(recover("brands", brands)));
        self.colors.finish(choices(recover("colors", colors)));
        self.sizes.finish(choices(recover("sizes", sizes)));
        self.materials.finish(choices(recover("materials", materials)));
        self.patterns.finish(choices(recover("patterns", patterns)));
        self.units.finish(choices(recover("units", units)));
        self.countries.finish(choices(recover("countries", countries)));
        self.tags.finish(choices(recover("tags", tags)));
        self.warranties.finish(choices(recover("warranties", warranties)));
        self.attributes.finish(
            recover("attributes", attributes)
                .into_iter()
                .map(Attribute::from_row)
                .collect(),
        );
    }

    /// Whether every selection list has finished loading.
    ///
    /// True once the eleven lists are `Loaded` (the attribute pool is
    /// deliberately excluded), and stays true from then on.
    #[must_use]
    pub fn is_fully_loaded(&self) -> bool {
        self.categories.is_loaded()
            && self.taxes.is_loaded()
            && self.brands.is_loaded()
            && self.colors.is_loaded()
            && self.sizes.is_loaded()
            && self.materials.is_loaded()
            && self.patterns.is_loaded()
            && self.units.is_loaded()
            && self.countries.is_loaded()
            && self.tags.is_loaded()
            && self.warranties.is_loaded()
    }
}

fn choices<Id: From<String>>(rows: Vec<NamedRow>) -> Vec<Choice<Id>> {
    rows.into_iter().map(Choice::from_row).collect()
}

fn recover<T>(list: &str, result: Result<Vec<T>, ApiError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(error) => {
            warn!(list, error = %error, "reference fetch failed, continuing with an empty list");
            Vec::new()
        }
    }
}
