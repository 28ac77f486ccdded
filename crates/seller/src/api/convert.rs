//! Wire-to-form conversion.
//!
//! Maps the loosely-typed product payload into the internal [`FormModel`],
//! applying the documented defaulting rules: missing scalars become empty
//! defaults, boolean-ish flags become real bools, and every variant's
//! stock policy is derived from the product-level unlimited-stock flag.

use tradewind_core::{
    BrandId, CategoryId, ColorId, ImageId, MaterialId, PatternId, ProductId, SizeId, StockPolicy,
    TagId, TaxId, UnitId, VariantId, VariantKind, WarrantyId,
};

use crate::form::FormModel;
use crate::form::images::{ExistingImage, ImageSet};
use crate::form::variants::{Variant, VariantCollection};

use super::types::{GalleryImageDto, ProductDto, VariantDto};

/// Build the form model from a fetched product.
#[must_use]
pub fn form_from_product(dto: ProductDto) -> FormModel {
    let policy = StockPolicy::from_unlimited_flag(dto.is_unlimited_stock);

    let mut variant_rows = dto.variants.into_iter();
    // The first server row merges into the primary-variant defaults rather
    // than replacing them wholesale; the rest become the additional list.
    let primary = variant_rows
        .next()
        .map_or_else(|| Variant::blank(VariantKind::Packet, policy), |row| {
            variant_from_dto(row, policy)
        });
    let additional: Vec<Variant> = variant_rows
        .map(|row| variant_from_dto(row, policy))
        .collect();

    let main_image = (!dto.main_image.trim().is_empty()).then(|| ExistingImage {
        url: dto.main_image,
        remote_id: (!dto.main_image_id.is_empty()).then(|| ImageId::new(dto.main_image_id)),
    });

    let mut form = FormModel {
        product_id: ProductId::new(dto.id),
        name: dto.name,
        slug: dto.slug,
        category_id: CategoryId::new(dto.category_id),
        tax_id: TaxId::new(dto.tax_id),
        brand_id: BrandId::new(dto.brand_id),
        warranty_id: WarrantyId::new(dto.warranty_id),
        accessories_warranty_id: WarrantyId::new(dto.accessories_warranty_id),
        description: dto.description,
        tags: dto.tags.into_iter().map(TagId::new).collect(),
        settings: crate::form::ProductSettings {
            returnable: dto.return_status,
            cancelable: dto.cancelable_status,
            cod_allowed: dto.cod_allowed,
        },
        specifications: crate::form::attributes::SpecificationValues::from_wire(
            dto.product_attributes,
        ),
        variants: VariantCollection::from_loaded(primary, additional),
        images: ImageSet::from_server(main_image, existing_gallery(dto.other_images)),
        updated_at: dto.updated_at,
    };

    if form.slug.is_empty() && !form.name.is_empty() {
        form.slug = tradewind_core::generate_slug(&form.name);
    }

    form
}

/// Map one wire variant row onto a blank row, keeping defaults for fields
/// the server did not populate.
fn variant_from_dto(dto: VariantDto, policy: StockPolicy) -> Variant {
    let mut v = Variant::blank(VariantKind::parse_lossy(&dto.kind), policy);

    if !dto.id.is_empty() {
        v.remote_id = VariantId::new(dto.id);
    }
    merge(&mut v.measurement, dto.measurement);
    merge(&mut v.weight, dto.weight);
    merge(&mut v.height, dto.height);
    merge(&mut v.price, dto.price);
    merge(&mut v.discounted_price, dto.discounted_price);
    merge(&mut v.title, dto.title);
    merge(&mut v.capacity, dto.capacity);
    merge(&mut v.mattress_size, dto.mattress_size);
    merge(&mut v.status, dto.status);
    merge(&mut v.pack, dto.pack);
    merge(&mut v.no_of_pics, dto.no_of_pics);
    merge(&mut v.dimensions, dto.dimensions);
    merge(&mut v.flavour, dto.flavour);
    merge(&mut v.stock, dto.stock);
    if !dto.material_id.is_empty() {
        v.material_id = MaterialId::new(dto.material_id);
    }
    if !dto.unit_id.is_empty() {
        v.unit_id = UnitId::new(dto.unit_id);
    }
    if !dto.color_id.is_empty() {
        v.color_id = ColorId::new(dto.color_id);
    }
    if !dto.pattern_id.is_empty() {
        v.pattern_id = PatternId::new(dto.pattern_id);
    }
    if !dto.size_id.is_empty() {
        v.size_id = SizeId::new(dto.size_id);
    }
    v.images = existing_gallery(dto.images);

    v
}

fn merge(slot: &mut String, value: String) {
    if !value.is_empty() {
        *slot = value;
    }
}

fn existing_gallery(rows: Vec<GalleryImageDto>) -> Vec<ExistingImage> {
    rows.into_iter()
        .map(|row| ExistingImage {
            remote_id: (!row.id.is_empty()).then(|| ImageId::new(row.id)),
            url: row.url,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradewind_core::AttributeId;

    fn product_json(extra: &str) -> ProductDto {
        let json = format!(
            r#"{{"id": 12, "name": "Oak Table", "slug": "oak-table"{}{extra}}}"#,
            if extra.is_empty() { "" } else { ", " },
        );
        serde_json::from_str(&json).expect("fixture parses")
    }

    #[test]
    fn test_first_variant_merges_into_primary_defaults() {
        let dto = product_json(
            r#""variants": [{"id": 5, "price": "19.99", "status": ""}, {"id": 6, "price": "24.99"}]"#,
        );
        let form = form_from_product(dto);

        let primary = form.variants.primary();
        assert_eq!(primary.remote_id, VariantId::new("5"));
        assert_eq!(primary.price, "19.99");
        // An empty server status keeps the "active" default
        assert_eq!(primary.status, "active");
        assert_eq!(form.variants.additional().len(), 1);
        assert_eq!(form.variants.additional()[0].price, "24.99");
    }

    #[test]
    fn test_stock_policy_comes_from_product_flag() {
        let dto = product_json(
            r#""is_unlimited_stock": "1", "variants": [{"id": 5}, {"id": 6}]"#,
        );
        let form = form_from_product(dto);
        assert!(form.variants.iter().all(|v| v.stock_policy == StockPolicy::Unlimited));

        let dto = product_json(r#""variants": [{"id": 5}]"#);
        let form = form_from_product(dto);
        assert_eq!(form.variants.primary().stock_policy, StockPolicy::Limited);
    }

    #[test]
    fn test_variant_kind_parsing_defaults_to_packet() {
        let dto = product_json(
            r#""variants": [{"type": "LOOSE"}, {"type": "crate"}, {}]"#,
        );
        let form = form_from_product(dto);
        assert_eq!(form.variants.primary().kind, VariantKind::Loose);
        assert_eq!(form.variants.additional()[0].kind, VariantKind::Packet);
        assert_eq!(form.variants.additional()[1].kind, VariantKind::Packet);
    }

    #[test]
    fn test_product_without_variants_gets_blank_primary() {
        let form = form_from_product(product_json(""));
        assert_eq!(form.variants.len(), 1);
        assert!(form.variants.primary().remote_id.is_empty());
        assert_eq!(form.variants.primary().status, "active");
    }

    #[test]
    fn test_main_image_and_gallery_become_existing_refs() {
        let dto = product_json(concat!(
            r#""main_image": "https://cdn.example.com/main.jpg", "main_image_id": 7, "#,
            r#""other_images": [{"id": 31, "image_url": "https://cdn.example.com/a.jpg"}, "https://cdn.example.com/b.jpg"]"#,
        ));
        let form = form_from_product(dto);

        let gallery: Vec<_> = form.images.gallery().collect();
        assert_eq!(gallery.len(), 2);
        assert!(form.images.main().is_some());
        assert_eq!(form.images.gallery_len(), 2);
    }

    #[test]
    fn test_settings_and_tags_and_specifications() {
        let dto = product_json(concat!(
            r#""return_status": "Yes", "cod_allowed": 1, "tags": [3, 9], "#,
            r#""product_attributes": {"2": "Cotton"}"#,
        ));
        let form = form_from_product(dto);

        assert!(form.settings.returnable);
        assert!(!form.settings.cancelable);
        assert!(form.settings.cod_allowed);
        assert_eq!(form.tags.len(), 2);
        assert!(form.tags.contains(&TagId::new("9")));
        assert_eq!(
            form.specifications.get(&AttributeId::new("2")),
            Some("Cotton")
        );
    }

    #[test]
    fn test_missing_slug_is_regenerated_from_name() {
        let dto: ProductDto =
            serde_json::from_str(r#"{"id": 1, "name": "Velvet Sofa"}"#).expect("parses");
        let form = form_from_product(dto);
        assert_eq!(form.slug, "velvet-sofa");
    }
}
