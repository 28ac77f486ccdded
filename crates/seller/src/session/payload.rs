//! Save-payload assembly.
//!
//! Reads the form model once and produces the outbound multipart form:
//! every scalar as a string, booleans as `"1"`/`"0"`, the `"null"`
//! sentinel for deliberately-unset optional references, the variant list
//! as a JSON array with the primary always first, and the accumulated
//! specification values submitted verbatim.

use serde::Serialize;

use crate::api::products::UpdateProductForm;
use crate::form::FormModel;
use crate::form::variants::Variant;

/// Empty-sentinel for optional reference fields the seller left unset.
const NULL_SENTINEL: &str = "null";

/// One variant row as the server expects it inside the `variants` field.
#[derive(Serialize)]
struct VariantPayload<'a> {
    /// Server id; empty means "create this row on save".
    id: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    measurement: &'a str,
    material_id: &'a str,
    weight: &'a str,
    height: &'a str,
    price: &'a str,
    discounted_price: &'a str,
    unit_id: &'a str,
    title: &'a str,
    color_id: &'a str,
    pattern_id: &'a str,
    capacity: &'a str,
    mattress_size: &'a str,
    status: &'a str,
    pack: &'a str,
    size_id: &'a str,
    no_of_pics: &'a str,
    dimensions: &'a str,
    flavour: &'a str,
    stock: &'a str,
}

impl<'a> From<&'a Variant> for VariantPayload<'a> {
    fn from(v: &'a Variant) -> Self {
        Self {
            id: v.remote_id.as_str(),
            kind: v.kind.as_wire(),
            measurement: &v.measurement,
            material_id: v.material_id.as_str(),
            weight: &v.weight,
            height: &v.height,
            price: &v.price,
            discounted_price: &v.discounted_price,
            unit_id: v.unit_id.as_str(),
            title: &v.title,
            color_id: v.color_id.as_str(),
            pattern_id: v.pattern_id.as_str(),
            capacity: &v.capacity,
            mattress_size: &v.mattress_size,
            status: &v.status,
            pack: &v.pack,
            size_id: v.size_id.as_str(),
            no_of_pics: &v.no_of_pics,
            dimensions: &v.dimensions,
            flavour: &v.flavour,
            stock: &v.stock,
        }
    }
}

/// Assemble the outbound update request from the form model.
///
/// The model is only read; nothing here mutates session state.
///
/// # Errors
///
/// Returns a serialization error if one of the embedded JSON fields
/// cannot be encoded (practically unreachable for these types).
pub fn build_update_form(form: &FormModel) -> Result<UpdateProductForm, serde_json::Error> {
    let variants: Vec<VariantPayload<'_>> = form.variants.iter().map(VariantPayload::from).collect();
    let tags: Vec<&str> = form.tags.iter().map(tradewind_core::TagId::as_str).collect();
    let delete_image_ids: Vec<&str> = form
        .images
        .deleted_image_ids()
        .iter()
        .map(tradewind_core::ImageId::as_str)
        .collect();

    let fields: Vec<(String, String)> = [
        ("product_id", form.product_id.as_str().to_string()),
        ("name", form.name.clone()),
        ("slug", form.slug.clone()),
        ("description", form.description.clone()),
        ("category_id", form.category_id.as_str().to_string()),
        ("tax_id", optional_ref(form.tax_id.as_str())),
        ("brand_id", optional_ref(form.brand_id.as_str())),
        ("warranty_id", optional_ref(form.warranty_id.as_str())),
        (
            "accessories_warranty_id",
            optional_ref(form.accessories_warranty_id.as_str()),
        ),
        ("tags", serde_json::to_string(&tags)?),
        ("return_status", flag(form.settings.returnable)),
        ("cancelable_status", flag(form.settings.cancelable)),
        ("cod_allowed", flag(form.settings.cod_allowed)),
        // "1" if any variant carries unlimited stock, not just the primary
        ("is_unlimited_stock", flag(form.variants.any_unlimited())),
        ("variants", serde_json::to_string(&variants)?),
        // Submitted verbatim, including values for attributes the current
        // category no longer shows
        ("product_attributes", serde_json::to_string(&form.specifications)?),
        ("delete_image_ids", serde_json::to_string(&delete_image_ids)?),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    Ok(UpdateProductForm {
        fields,
        main_image: form.images.staged_main().cloned(),
        gallery: form.images.staged_gallery().to_vec(),
    })
}

fn flag(value: bool) -> String {
    if value { "1" } else { "0" }.to_string()
}

fn optional_ref(id: &str) -> String {
    if id.is_empty() {
        NULL_SENTINEL.to_string()
    } else {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::convert::form_from_product;
    use crate::form::images::StagedImage;
    use tradewind_core::{AttributeId, BrandId, TagId};

    fn loaded_form() -> FormModel {
        let dto = serde_json::from_str(
            r#"{
                "id": 12,
                "name": "Oak Table",
                "slug": "oak-table",
                "category_id": 5,
                "tax_id": 2,
                "is_unlimited_stock": false,
                "variants": [
                    {"id": 5, "price": "19.99", "measurement": "500", "unit_id": 2, "size_id": 4, "stock": "12"}
                ]
            }"#,
        )
        .expect("fixture parses");
        form_from_product(dto)
    }

    #[test]
    fn test_end_to_end_limited_stock_flow() {
        let mut form = loaded_form();
        // The loaded product tracks stock, so every row is Limited
        assert!(!form.variants.any_unlimited());

        form.variants.add_empty();
        assert_eq!(form.variants.additional().len(), 1);

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("is_unlimited_stock"), Some("0"));

        let variants: serde_json::Value =
            serde_json::from_str(update.field("variants").expect("variants field"))
                .expect("variants JSON");
        let rows = variants.as_array().expect("array");
        assert_eq!(rows.len(), 2);
        // Primary always first; the copy row is new (empty id)
        assert_eq!(rows[0]["id"], "5");
        assert_eq!(rows[0]["price"], "19.99");
        assert_eq!(rows[1]["id"], "");
    }

    #[test]
    fn test_unlimited_when_any_variant_is_unlimited() {
        use crate::form::variants::VariantCollection;
        use tradewind_core::StockPolicy;

        let mut form = loaded_form();
        let primary = form.variants.primary().clone();
        assert_eq!(primary.stock_policy, StockPolicy::Limited);

        // Only an additional row carries unlimited stock
        let extra = Variant::blank(primary.kind, StockPolicy::Unlimited);
        form.variants = VariantCollection::from_loaded(primary, vec![extra]);

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("is_unlimited_stock"), Some("1"));
    }

    #[test]
    fn test_booleans_encode_as_digit_strings() {
        let mut form = loaded_form();
        form.settings.returnable = true;
        form.settings.cod_allowed = false;

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("return_status"), Some("1"));
        assert_eq!(update.field("cancelable_status"), Some("0"));
        assert_eq!(update.field("cod_allowed"), Some("0"));
    }

    #[test]
    fn test_unset_optional_refs_use_null_sentinel() {
        let mut form = loaded_form();
        form.brand_id = BrandId::default();

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("brand_id"), Some("null"));
        assert_eq!(update.field("warranty_id"), Some("null"));
        // Set references are sent as-is
        assert_eq!(update.field("tax_id"), Some("2"));
        assert_eq!(update.field("category_id"), Some("5"));
    }

    #[test]
    fn test_specifications_are_sent_verbatim_including_stale_keys() {
        let mut form = loaded_form();
        form.specifications.set(AttributeId::new("2"), "Cotton");
        // A value left over from a previously selected category
        form.specifications.set(AttributeId::new("44"), "Stale");

        let update = build_update_form(&form).expect("payload builds");
        let map: serde_json::Value =
            serde_json::from_str(update.field("product_attributes").expect("field"))
                .expect("JSON");
        assert_eq!(map["2"], "Cotton");
        assert_eq!(map["44"], "Stale");
    }

    #[test]
    fn test_deleted_image_ids_ride_along() {
        let mut form = loaded_form();
        form.images = crate::form::images::ImageSet::from_server(
            None,
            vec![crate::form::images::ExistingImage {
                url: "https://cdn.example.com/a.jpg".to_string(),
                remote_id: Some(tradewind_core::ImageId::new("31")),
            }],
        );
        form.images.remove_gallery_at(0);

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("delete_image_ids"), Some(r#"["31"]"#));
    }

    #[test]
    fn test_staged_files_are_carried_as_parts() {
        let mut form = loaded_form();
        form.images
            .set_main(StagedImage::new("main.jpg", vec![1, 2, 3]))
            .expect("valid file");
        form.images
            .add_gallery_files(vec![StagedImage::new("extra.png", vec![4, 5])])
            .expect("valid batch");

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.main_image.as_ref().map(|f| f.file_name.as_str()), Some("main.jpg"));
        assert_eq!(update.gallery.len(), 1);
        assert_eq!(update.gallery[0].content_type, "image/png");
    }

    #[test]
    fn test_tags_encode_as_json_array() {
        let mut form = loaded_form();
        form.tags.insert(TagId::new("3"));
        form.tags.insert(TagId::new("9"));

        let update = build_update_form(&form).expect("payload builds");
        assert_eq!(update.field("tags"), Some(r#"["3","9"]"#));
    }
}
