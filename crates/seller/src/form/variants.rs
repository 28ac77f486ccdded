//! The variant collection: one primary variant plus additional rows.
//!
//! The primary variant is the first/"current" one, edited through
//! dedicated form fields, and can never be removed. Additional variants
//! live in a list and are addressed by their client-side [`VariantKey`];
//! remote ids stay empty until the server assigns one on save.

use serde::Serialize;

use tradewind_core::{
    ColorId, MaterialId, PatternId, SizeId, StockPolicy, UnitId, VariantId, VariantKey,
    VariantKind, decimal,
};

use super::images::ExistingImage;

/// Default status for freshly added variant rows.
const DEFAULT_STATUS: &str = "active";

/// A form field on a variant row.
///
/// Shells bind their inputs to these; the collection routes the value to
/// the right slot on the addressed variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantField {
    Kind,
    Measurement,
    Material,
    Weight,
    Height,
    Price,
    DiscountedPrice,
    Unit,
    Title,
    Color,
    Pattern,
    Capacity,
    MattressSize,
    Status,
    Pack,
    Size,
    NoOfPics,
    Dimensions,
    Flavour,
    Stock,
}

/// One purchasable SKU configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// Client-only identity, stable for the lifetime of the list.
    pub key: VariantKey,
    /// Server identity; empty means "create on save".
    pub remote_id: VariantId,
    pub kind: VariantKind,
    pub stock_policy: StockPolicy,
    pub measurement: String,
    pub material_id: MaterialId,
    pub weight: String,
    pub height: String,
    pub price: String,
    pub discounted_price: String,
    pub unit_id: UnitId,
    pub title: String,
    pub color_id: ColorId,
    pub pattern_id: PatternId,
    pub capacity: String,
    pub mattress_size: String,
    pub status: String,
    pub pack: String,
    pub size_id: SizeId,
    pub no_of_pics: String,
    pub dimensions: String,
    pub flavour: String,
    pub stock: String,
    pub images: Vec<ExistingImage>,
}

impl Variant {
    /// A blank row with the given packaging kind and stock policy.
    #[must_use]
    pub fn blank(kind: VariantKind, stock_policy: StockPolicy) -> Self {
        Self {
            key: VariantKey::fresh(),
            remote_id: VariantId::default(),
            kind,
            stock_policy,
            measurement: String::new(),
            material_id: MaterialId::default(),
            weight: String::new(),
            height: String::new(),
            price: String::new(),
            discounted_price: String::new(),
            unit_id: UnitId::default(),
            title: String::new(),
            color_id: ColorId::default(),
            pattern_id: PatternId::default(),
            capacity: String::new(),
            mattress_size: String::new(),
            status: DEFAULT_STATUS.to_string(),
            pack: String::new(),
            size_id: SizeId::default(),
            no_of_pics: String::new(),
            dimensions: String::new(),
            flavour: String::new(),
            stock: String::new(),
            images: Vec::new(),
        }
    }

    /// Set one field from a form input value.
    pub fn set(&mut self, field: VariantField, value: impl Into<String>) {
        let value = value.into();
        match field {
            VariantField::Kind => self.kind = VariantKind::parse_lossy(&value),
            VariantField::Measurement => self.measurement = value,
            VariantField::Material => self.material_id = MaterialId::new(value),
            VariantField::Weight => self.weight = value,
            VariantField::Height => self.height = value,
            VariantField::Price => self.price = value,
            VariantField::DiscountedPrice => self.discounted_price = value,
            VariantField::Unit => self.unit_id = UnitId::new(value),
            VariantField::Title => self.title = value,
            VariantField::Color => self.color_id = ColorId::new(value),
            VariantField::Pattern => self.pattern_id = PatternId::new(value),
            VariantField::Capacity => self.capacity = value,
            VariantField::MattressSize => self.mattress_size = value,
            VariantField::Status => self.status = value,
            VariantField::Pack => self.pack = value,
            VariantField::Size => self.size_id = SizeId::new(value),
            VariantField::NoOfPics => self.no_of_pics = value,
            VariantField::Dimensions => self.dimensions = value,
            VariantField::Flavour => self.flavour = value,
            VariantField::Stock => self.stock = value,
        }
    }

    /// Whether a field should be shown for this row.
    ///
    /// Packet-only fields (the kind selector itself, height, pack,
    /// flavour) hide on loose variants; the stock field hides when stock
    /// is unlimited.
    #[must_use]
    pub fn is_field_visible(&self, field: VariantField) -> bool {
        match field {
            VariantField::Kind | VariantField::Height | VariantField::Pack
            | VariantField::Flavour => self.kind == VariantKind::Packet,
            VariantField::Stock => self.stock_policy == StockPolicy::Limited,
            _ => true,
        }
    }

    /// Clone this row as a new, unpersisted one.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            key: VariantKey::fresh(),
            remote_id: VariantId::default(),
            ..self.clone()
        }
    }
}

/// The product's variant rows: one primary plus zero-or-more additional.
#[derive(Debug, Clone, Serialize)]
pub struct VariantCollection {
    primary: Variant,
    additional: Vec<Variant>,
}

impl Default for VariantCollection {
    fn default() -> Self {
        Self::new(Variant::blank(VariantKind::default(), StockPolicy::default()))
    }
}

impl VariantCollection {
    /// Build a collection around a primary variant.
    #[must_use]
    pub const fn new(primary: Variant) -> Self {
        Self {
            primary,
            additional: Vec::new(),
        }
    }

    /// Build a collection from a loaded variant list, primary first.
    #[must_use]
    pub fn from_loaded(primary: Variant, additional: Vec<Variant>) -> Self {
        Self { primary, additional }
    }

    /// The primary variant.
    #[must_use]
    pub const fn primary(&self) -> &Variant {
        &self.primary
    }

    /// The additional variants, in insertion order.
    #[must_use]
    pub fn additional(&self) -> &[Variant] {
        &self.additional
    }

    /// All variants, primary first.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        std::iter::once(&self.primary).chain(self.additional.iter())
    }

    /// Total number of variants including the primary.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.additional.len()
    }

    /// Always false; the primary variant always exists.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Whether any variant carries unlimited stock.
    #[must_use]
    pub fn any_unlimited(&self) -> bool {
        self.iter().any(|v| v.stock_policy == StockPolicy::Unlimited)
    }

    /// Set one field on the primary variant. Other rows are untouched.
    pub fn update_primary(&mut self, field: VariantField, value: impl Into<String>) {
        self.primary.set(field, value);
    }

    /// Append a blank additional row.
    ///
    /// The new row inherits the primary's packaging kind and stock policy
    /// so it matches the product-wide packet/loose and stock-limit choice;
    /// everything else is reset. The primary variant itself is untouched.
    pub fn add_empty(&mut self) -> VariantKey {
        let row = Variant::blank(self.primary.kind, self.primary.stock_policy);
        let key = row.key;
        self.additional.push(row);
        key
    }

    /// Append a copy of the variant addressed by `key` (primary or
    /// additional) as a new, unpersisted row.
    ///
    /// The copy gets a fresh key and an empty remote id; every other field
    /// matches the source. Returns `None` when no variant has that key.
    pub fn copy(&mut self, key: VariantKey) -> Option<VariantKey> {
        let source = self.iter().find(|v| v.key == key)?;
        let copy = source.duplicate();
        let new_key = copy.key;
        self.additional.push(copy);
        Some(new_key)
    }

    /// Remove the additional row addressed by `key`.
    ///
    /// The primary variant is not removable through this operation;
    /// passing its key is a no-op. Returns whether a row was removed.
    pub fn remove(&mut self, key: VariantKey) -> bool {
        let before = self.additional.len();
        self.additional.retain(|v| v.key != key);
        self.additional.len() != before
    }

    /// Set one field on the additional row addressed by `key`.
    ///
    /// Returns whether a row was found.
    pub fn update_field(
        &mut self,
        key: VariantKey,
        field: VariantField,
        value: impl Into<String>,
    ) -> bool {
        if let Some(row) = self.additional.iter_mut().find(|v| v.key == key) {
            row.set(field, value);
            true
        } else {
            false
        }
    }

    /// Apply a stock policy to every row.
    ///
    /// Stock tracking is a product-wide setting even though each row
    /// stores its own copy.
    pub fn set_stock_policy(&mut self, policy: StockPolicy) {
        self.primary.stock_policy = policy;
        for row in &mut self.additional {
            row.stock_policy = policy;
        }
    }

    /// Names of required primary-variant fields that are still unset.
    ///
    /// Scans every field before returning so the caller can report all of
    /// them in one message; an empty result means the variant step is
    /// complete.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&'static str> {
        let primary = &self.primary;
        let mut missing = Vec::new();

        if primary.measurement.trim().is_empty() {
            missing.push("measurement");
        }
        if decimal::is_zero_or_unset(&primary.price) {
            missing.push("price");
        }
        if primary.unit_id.is_empty() {
            missing.push("unit");
        }
        if primary.status.trim().is_empty() {
            missing.push("status");
        }
        if primary.size_id.is_empty() {
            missing.push("size");
        }
        if primary.stock_policy == StockPolicy::Limited
            && decimal::is_zero_or_unset(&primary.stock)
        {
            missing.push("stock");
        }

        missing
    }
}
